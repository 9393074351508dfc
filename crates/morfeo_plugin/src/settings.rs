//! Plugin settings and the default theme seeded on page creation

use indexmap::IndexMap;
use morfeo_core::{validate_variant_name, Slice, SliceCategory};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_THEME_PAGE_NAME, PLUGIN_DATA_NAMESPACE};
use crate::error::{Result, SyncError};

/// Where the plugin keeps its state in the document
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PluginSettings {
    /// Plugin data namespace
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Name of the theme page
    #[serde(default = "default_theme_page")]
    pub theme_page: String,
}

fn default_namespace() -> String {
    PLUGIN_DATA_NAMESPACE.to_string()
}

fn default_theme_page() -> String {
    DEFAULT_THEME_PAGE_NAME.to_string()
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            theme_page: default_theme_page(),
        }
    }
}

/// Variants created for each category on a fresh theme page
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DefaultTheme {
    #[serde(default = "default_radius")]
    pub radius: IndexMap<String, f32>,
    #[serde(default = "default_border_width")]
    pub border_width: IndexMap<String, f32>,
}

fn default_radius() -> IndexMap<String, f32> {
    IndexMap::from([
        ("S".to_string(), 3.0),
        ("M".to_string(), 6.0),
        ("L".to_string(), 10.0),
    ])
}

fn default_border_width() -> IndexMap<String, f32> {
    IndexMap::from([
        ("none".to_string(), 0.0),
        ("XS".to_string(), 0.5),
        ("S".to_string(), 1.0),
        ("M".to_string(), 2.0),
        ("L".to_string(), 3.0),
    ])
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            border_width: default_border_width(),
        }
    }
}

impl DefaultTheme {
    pub fn variants(&self, category: SliceCategory) -> &IndexMap<String, f32> {
        match category {
            SliceCategory::Radius => &self.radius,
            SliceCategory::BorderWidth => &self.border_width,
        }
    }

    /// Every category needs at least one variant, and every name must be
    /// usable inside composite component names.
    pub fn validate(&self) -> Result<()> {
        for category in SliceCategory::ALL {
            let variants = self.variants(category);
            if variants.is_empty() {
                return Err(SyncError::InvalidDefaultTheme {
                    category,
                    reason: "at least one variant is required".to_string(),
                });
            }
            for name in variants.keys() {
                validate_variant_name(name).map_err(|err| SyncError::InvalidDefaultTheme {
                    category,
                    reason: err.to_string(),
                })?;
            }
        }
        Ok(())
    }

    /// One slice per category, in composition order
    pub fn slices(&self) -> Vec<Slice> {
        SliceCategory::ALL
            .iter()
            .map(|&category| {
                Slice::with_variants(
                    category.slice_name(),
                    category.style_key(),
                    self.variants(category)
                        .iter()
                        .map(|(name, value)| (name.clone(), *value)),
                )
            })
            .collect()
    }
}
