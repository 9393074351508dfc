//! Subcommand implementations

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use morfeo_core::{Document, MemoryDocument, Notification, PluginData, SliceCategory, VariantSnapshot};
use morfeo_plugin::constants::snapshot_key;
use morfeo_plugin::{Controller, Outcome, PluginMessage};
use std::fs;
use std::path::Path;

use crate::config::{MorfeoConfig, CONFIG_FILE};

/// Write a default morfeo.toml and an empty document into `dir`
pub fn init(dir: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    let config = MorfeoConfig::default();
    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let document_path = config.document_path(dir);
    if !document_path.exists() || force {
        save_document(&document_path, &MemoryDocument::new())?;
    }

    tracing::info!(config = %config_path.display(), "initialized morfeo project");
    Ok(())
}

pub fn load_document(path: &Path) -> Result<MemoryDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse document {}", path.display()))
}

pub fn save_document(path: &Path, doc: &MemoryDocument) -> Result<()> {
    let content = serde_json::to_string_pretty(doc).context("Failed to serialize document")?;
    fs::write(path, content).with_context(|| format!("Failed to write document {}", path.display()))
}

/// What a dispatched action left behind for the user
#[derive(Debug)]
pub struct Dispatched {
    pub outcome: Outcome,
    pub notifications: Vec<Notification>,
    pub posted: Vec<serde_json::Value>,
}

/// Run one plugin action against the project in `dir`. The document is only
/// written back when the action succeeds.
pub fn dispatch(dir: &Path, action: &str) -> Result<Dispatched> {
    let message = PluginMessage::from_type(action).ok_or_else(|| {
        let known: Vec<&str> = PluginMessage::ALL.iter().map(|m| m.as_str()).collect();
        anyhow!("Unknown action `{action}`. Expected one of: {}", known.join(", "))
    })?;

    let config = MorfeoConfig::load_from_dir(dir)?;
    let document_path = config.document_path(dir);
    let mut doc = load_document(&document_path)?;

    let controller = Controller::new(config.plugin, config.theme);
    let result = controller.handle(&mut doc, message);
    let notifications = doc.take_notifications();
    let posted = doc.take_outbox();

    for notification in &notifications {
        if notification.options.error {
            eprintln!("error: {}", notification.message);
        } else {
            println!("{}", notification.message);
        }
    }

    let outcome = result.with_context(|| format!("`{action}` failed"))?;
    save_document(&document_path, &doc)?;

    for message in &posted {
        println!("{}", serde_json::to_string_pretty(message)?);
    }

    Ok(Dispatched {
        outcome,
        notifications,
        posted,
    })
}

/// Decode the variant snapshots stored on the theme page
pub fn read_snapshots(
    config: &MorfeoConfig,
    doc: &MemoryDocument,
) -> Result<IndexMap<SliceCategory, VariantSnapshot>> {
    let page = doc.find_page(&config.plugin.theme_page).ok_or_else(|| {
        anyhow!(
            "No '{}' page in the document. Run `morfeo dispatch create-morfeo-theme` first.",
            config.plugin.theme_page
        )
    })?;

    let mut snapshots = IndexMap::new();
    for category in SliceCategory::ALL {
        let raw = doc.plugin_data(&page, &config.plugin.namespace, snapshot_key(category));
        let snapshot = VariantSnapshot::decode(&raw)
            .with_context(|| format!("Corrupted {category} snapshot"))?;
        snapshots.insert(category, snapshot);
    }
    Ok(snapshots)
}

/// Print every stored variant with the components it owns
pub fn ledger(dir: &Path) -> Result<()> {
    let config = MorfeoConfig::load_from_dir(dir)?;
    let doc = load_document(&config.document_path(dir))?;

    for (category, snapshot) in read_snapshots(&config, &doc)? {
        println!("{category}:");
        for (name, ids) in snapshot.iter() {
            let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
            println!("  {name}: {}", ids.join(", "));
        }
    }
    Ok(())
}
