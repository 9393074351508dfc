//! Morfeo configuration file handling

use anyhow::{Context, Result};
use morfeo_plugin::{DefaultTheme, PluginSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "morfeo.toml";

/// Top-level Morfeo configuration (morfeo.toml)
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MorfeoConfig {
    #[serde(default)]
    pub plugin: PluginSettings,
    /// Variants seeded by `create-morfeo-theme`
    #[serde(default)]
    pub theme: DefaultTheme,
    #[serde(default)]
    pub document: DocumentConfig,
}

/// Where the document lives on disk
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DocumentConfig {
    /// JSON document, relative to the config directory
    #[serde(default = "default_document_path")]
    pub path: String,
}

fn default_document_path() -> String {
    "morfeo-document.json".to_string()
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
        }
    }
}

impl MorfeoConfig {
    /// Load configuration from a directory (looks for morfeo.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `morfeo init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: MorfeoConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Absolute location of the document for a config found in `root`
    pub fn document_path(&self, root: &Path) -> PathBuf {
        let root = if root.is_file() {
            root.parent().unwrap_or(root)
        } else {
            root
        };
        root.join(&self.document.path)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
