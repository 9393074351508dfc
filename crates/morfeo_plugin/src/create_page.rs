//! `create-morfeo-theme`: build the theme page from the default theme

use indexmap::IndexMap;
use morfeo_core::{
    generate_combinations, materialize, store_links, Host, NodeId, NodeKind, NotifyOptions,
    SliceCategory,
};

use crate::constants::{frame_size, snapshot_key, BOX_FRAME_SIZE, BOX_NAME, BOX_REF_KEY, THEME_PAGE_CREATED};
use crate::error::{Result, SyncError};
use crate::settings::{DefaultTheme, PluginSettings};

/// Nodes created for a new theme page
#[derive(Clone, Debug, PartialEq)]
pub struct ThemePage {
    pub page: NodeId,
    /// Category frame holding the primitives, per category
    pub frames: IndexMap<SliceCategory, NodeId>,
    pub box_set: NodeId,
    pub instances: Vec<NodeId>,
}

/// Create the theme page, its primitives and every Box variant, then link
/// them. Refuses to touch a document that already has a theme page, or to
/// seed one from a theme whose variants could not be synced later.
pub fn create_theme_page<H>(
    host: &mut H,
    settings: &PluginSettings,
    theme: &DefaultTheme,
) -> Result<ThemePage>
where
    H: Host + ?Sized,
{
    theme.validate()?;
    if host.find_page(&settings.theme_page).is_some() {
        return Err(SyncError::ThemePageExists(settings.theme_page.clone()));
    }

    let page = host.create_page(&settings.theme_page);
    host.set_current_page(&page)?;

    let mut frames = IndexMap::new();
    let mut primitives: IndexMap<SliceCategory, IndexMap<String, NodeId>> = IndexMap::new();
    for category in SliceCategory::ALL {
        let frame = host.create_node(NodeKind::Frame, category.frame_name());
        let mut created = IndexMap::new();
        for (name, value) in theme.variants(category) {
            let primitive = host.create_node(category.accepted_kind(), name);
            host.set_style_value(&primitive, category.style_key(), *value)?;
            host.append_child(&frame, &primitive)?;
            created.insert(name.clone(), primitive);
        }
        let (width, height) = frame_size(category);
        host.resize(&frame, width, height)?;
        frames.insert(category, frame);
        primitives.insert(category, created);
    }

    let box_frame = host.create_node(NodeKind::Frame, BOX_NAME);
    let records = generate_combinations(&theme.slices());
    let materialized = materialize(host, &records)?;
    let box_set = host.combine_as_variants(&materialized.instances, &box_frame)?;
    host.set_node_name(&box_set, BOX_NAME)?;
    host.resize(&box_frame, BOX_FRAME_SIZE.0, BOX_FRAME_SIZE.1)?;

    for (category, created) in &primitives {
        let slice = category.slice_name();
        if let Some(links) = materialized.ledger.slice(slice) {
            store_links(host, &settings.namespace, created, links)?;
        }
        let snapshot = materialized.ledger.snapshot(slice).encode()?;
        host.set_plugin_data(&page, &settings.namespace, snapshot_key(*category), &snapshot)?;
    }
    host.set_plugin_data(&page, &settings.namespace, BOX_REF_KEY, box_set.as_str())?;

    tracing::info!(
        page = %page,
        variants = materialized.instances.len(),
        "created theme page"
    );

    host.notify(THEME_PAGE_CREATED, NotifyOptions::default());
    host.close_plugin();

    Ok(ThemePage {
        page,
        frames,
        box_set,
        instances: materialized.instances,
    })
}
