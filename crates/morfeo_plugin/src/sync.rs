//! `sync-theme`: push theme page edits onto the Box component set
//!
//! One pass, in order:
//! 1. locate the theme page, both category frames and the Box set (fatal)
//! 2. decode the saved variant snapshots (fatal when corrupt)
//! 3. reconcile every category, collecting diagnostics
//! 4. create components for tuples involving new variants
//! 5. sweep components of deleted variants and components no primitive links
//! 6. relink primitives and save fresh snapshots
//! 7. report diagnostics, then confirm

use indexmap::IndexMap;
use morfeo_core::{
    follow_renames, generate_incremental, materialize, prune_snapshot, prune_unlinked,
    read_slice_entries, reconcile, store_links, Diagnostics, Host, NodeId, NodeKind,
    NotifyOptions, Reconciled, SliceCategory, SliceDelta, VariantSnapshot,
};
use rustc_hash::FxHashSet;

use crate::constants::{snapshot_key, BOX_REF_KEY, COMPONENTS_UPDATED};
use crate::error::{Result, SyncError};
use crate::settings::PluginSettings;

/// Notification options of a diagnostic message
fn diagnostic_options() -> NotifyOptions {
    NotifyOptions::error().with_timeout(3000)
}

/// What a sync pass changed
#[derive(Clone, Debug, Default)]
pub struct SyncReport {
    /// Components created for new variants
    pub created: Vec<NodeId>,
    /// Variants per category that already had components
    pub existing: IndexMap<SliceCategory, usize>,
    /// Variants per category that received components in this pass
    pub added: IndexMap<SliceCategory, usize>,
    pub diagnostics: Diagnostics,
}

struct ThemeNodes {
    page: NodeId,
    frames: IndexMap<SliceCategory, NodeId>,
    box_set: NodeId,
}

fn locate<H>(host: &H, settings: &PluginSettings) -> Result<ThemeNodes>
where
    H: Host + ?Sized,
{
    let page = host
        .find_page(&settings.theme_page)
        .ok_or_else(|| SyncError::ThemePageMissing(settings.theme_page.clone()))?;

    let mut frames = IndexMap::new();
    for category in SliceCategory::ALL {
        let frame = host
            .find_one(&page, NodeKind::Frame, category.frame_name())
            .ok_or(SyncError::SliceFrameMissing(category))?;
        frames.insert(category, frame);
    }
    for (category, frame) in &frames {
        if host.children(frame).is_empty() {
            return Err(SyncError::EmptySliceFrame(*category));
        }
    }

    let box_set = NodeId::new(host.plugin_data(&page, &settings.namespace, BOX_REF_KEY));
    if host.node_kind(&box_set) != Some(NodeKind::ComponentSet) {
        return Err(SyncError::BoxComponentMissing);
    }

    Ok(ThemeNodes {
        page,
        frames,
        box_set,
    })
}

/// Run one sync pass against the theme page.
///
/// Per-primitive problems are reported as diagnostics and never stop the
/// pass. Missing nodes and corrupt snapshots are detected before the document
/// is modified.
pub fn sync_theme<H>(host: &mut H, settings: &PluginSettings) -> Result<SyncReport>
where
    H: Host + ?Sized,
{
    let nodes = locate(&*host, settings)?;
    let namespace = settings.namespace.as_str();

    let mut previous: IndexMap<SliceCategory, VariantSnapshot> = IndexMap::new();
    for category in SliceCategory::ALL {
        let raw = host.plugin_data(&nodes.page, namespace, snapshot_key(category));
        let snapshot = VariantSnapshot::decode(&raw)
            .map_err(|source| SyncError::CorruptSnapshot { category, source })?;
        previous.insert(category, snapshot);
    }

    let mut report = SyncReport::default();
    let mut reconciled: IndexMap<SliceCategory, Reconciled> = IndexMap::new();
    for (category, frame) in &nodes.frames {
        let entries = read_slice_entries(&*host, *category, frame, namespace);
        let outcome = reconcile(host, *category, &entries, &mut report.diagnostics)?;
        report.existing.insert(*category, outcome.existing.len());
        report.added.insert(*category, outcome.added.len());
        reconciled.insert(*category, outcome);
    }

    let deltas: Vec<SliceDelta> = reconciled
        .iter()
        .map(|(category, outcome)| {
            SliceDelta::new(
                category.slice_name(),
                category.style_key(),
                outcome.existing.clone(),
                outcome.added.clone(),
            )
        })
        .collect();
    let created = materialize(host, &generate_incremental(&deltas))?;
    for instance in &created.instances {
        host.append_child(&nodes.box_set, instance)?;
    }

    let mut pruned: IndexMap<SliceCategory, VariantSnapshot> = IndexMap::new();
    for (category, snapshot) in previous {
        let Some(outcome) = reconciled.get(&category) else {
            continue;
        };
        let retained = outcome.retained_links();
        let followed = follow_renames(snapshot, &retained);
        let current: FxHashSet<&str> = outcome.retained_names();
        let kept = prune_snapshot(host, followed, &current);
        pruned.insert(category, prune_unlinked(host, kept, &retained));
    }

    for (category, outcome) in &reconciled {
        let links = outcome.merged_links(&*host, created.ledger.slice(category.slice_name()));
        store_links(host, namespace, &outcome.primitives, &links)?;

        let mut snapshot = pruned.swap_remove(category).unwrap_or_default();
        snapshot.merge(links.into_iter().collect());
        host.set_plugin_data(&nodes.page, namespace, snapshot_key(*category), &snapshot.encode()?)?;
    }

    for message in report.diagnostics.messages() {
        host.notify(&message, diagnostic_options());
    }
    host.notify(COMPONENTS_UPDATED, NotifyOptions::default());

    tracing::info!(
        created = created.instances.len(),
        diagnostics = report.diagnostics.len(),
        "synced theme page"
    );
    report.created = created.instances;
    Ok(report)
}
