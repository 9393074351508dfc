//! Deletion sweep over the persisted variant snapshots

use rustc_hash::{FxHashMap, FxHashSet};

use crate::document::{Document, NodeId};
use crate::error::LedgerError;
use crate::ledger::{VariantRefs, VariantSnapshot};

/// Decode the previous snapshot and remove the components of every variant
/// that is no longer named in `current_names`.
///
/// The empty string is a snapshot that was never saved: nothing is removed.
pub fn prune_deleted<D>(
    doc: &mut D,
    previous: &str,
    current_names: &FxHashSet<&str>,
) -> Result<VariantSnapshot, LedgerError>
where
    D: Document + ?Sized,
{
    let snapshot = VariantSnapshot::decode(previous)?;
    Ok(prune_snapshot(doc, snapshot, current_names))
}

/// Drop stale entries from an already decoded snapshot, removing their
/// components. Kept entries are returned untouched, in their original order.
pub fn prune_snapshot<D>(
    doc: &mut D,
    snapshot: VariantSnapshot,
    current_names: &FxHashSet<&str>,
) -> VariantSnapshot
where
    D: Document + ?Sized,
{
    let mut removed: FxHashSet<NodeId> = FxHashSet::default();
    let mut kept = VariantSnapshot::new();

    for (name, ids) in snapshot {
        if current_names.contains(name.as_str()) {
            kept.insert(name, ids);
            continue;
        }
        tracing::debug!(variant = %name, count = ids.len(), "sweeping deleted variant");
        for id in ids {
            if removed.insert(id.clone()) && !doc.remove_node(&id) {
                tracing::debug!(%id, "component already gone");
            }
        }
    }

    if !removed.is_empty() {
        tracing::info!(removed = removed.len(), "swept stale components");
    }
    kept
}

/// Remove components a kept entry still lists although no primitive links
/// them any more, e.g. after a variant was deleted and recreated under the
/// same name. Returns the snapshot without those ids.
pub fn prune_unlinked<D>(
    doc: &mut D,
    snapshot: VariantSnapshot,
    links: &VariantRefs,
) -> VariantSnapshot
where
    D: Document + ?Sized,
{
    let linked: FxHashSet<&NodeId> = links.values().flatten().collect();
    let mut removed: FxHashSet<NodeId> = FxHashSet::default();
    let mut kept = VariantSnapshot::new();

    for (name, ids) in snapshot {
        let (live, stale): (Vec<NodeId>, Vec<NodeId>) =
            ids.into_iter().partition(|id| linked.contains(id));
        for id in stale {
            if removed.insert(id.clone()) && doc.remove_node(&id) {
                tracing::debug!(%id, variant = %name, "sweeping unlinked component");
            }
        }
        kept.insert(name, live);
    }

    if !removed.is_empty() {
        tracing::info!(removed = removed.len(), "swept unlinked components");
    }
    kept
}

/// Re-key snapshot entries that belong to renamed primitives.
///
/// An entry whose name is no longer linked, but whose ids are now linked under
/// a name the snapshot does not know yet, is moved to that name. Otherwise the
/// entry loses every id still linked elsewhere, so a sweep never removes a live
/// component.
pub fn follow_renames(snapshot: VariantSnapshot, links: &VariantRefs) -> VariantSnapshot {
    let owners: FxHashMap<&NodeId, &str> = links
        .iter()
        .flat_map(|(name, ids)| ids.iter().map(move |id| (id, name.as_str())))
        .collect();
    let mut claimed: FxHashSet<String> = snapshot.names().map(str::to_string).collect();

    snapshot
        .into_iter()
        .map(|(name, ids)| {
            if links.contains_key(&name) {
                return (name, ids);
            }
            let renamed = ids
                .iter()
                .filter_map(|id| owners.get(id).copied())
                .find(|owner| !claimed.contains(*owner));
            match renamed {
                Some(owner) => {
                    tracing::debug!(from = %name, to = owner, "following variant rename");
                    claimed.insert(owner.to_string());
                    (owner.to_string(), ids)
                }
                None => {
                    let orphaned = ids
                        .into_iter()
                        .filter(|id| !owners.contains_key(id))
                        .collect();
                    (name, orphaned)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeKind;
    use crate::memory::MemoryDocument;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn names<'a>(raw: &[&'a str]) -> FxHashSet<&'a str> {
        raw.iter().copied().collect()
    }

    fn components(doc: &mut MemoryDocument, count: usize) -> Vec<NodeId> {
        (0..count)
            .map(|i| doc.create_node(NodeKind::Component, &format!("Radius={i}")))
            .collect()
    }

    #[test]
    fn removes_components_of_deleted_variants_once() {
        let mut doc = MemoryDocument::new();
        let ids = components(&mut doc, 4);
        let previous = format!(
            r#"{{"S":"{}","M":"{}","L":"{}/#/{}"}}"#,
            ids[0], ids[1], ids[2], ids[3]
        );

        let kept = prune_deleted(&mut doc, &previous, &names(&["S", "M"])).unwrap();

        assert_eq!(doc.removed(), &[ids[2].clone(), ids[3].clone()]);
        assert_eq!(
            kept.encode().unwrap(),
            format!(r#"{{"S":"{}","M":"{}"}}"#, ids[0], ids[1])
        );
    }

    #[test]
    fn literal_snapshot_keeps_current_entries_verbatim() {
        let mut doc = MemoryDocument::new();
        let previous = r#"{"S":"12:12","M":"33:33","L":"44:11/#/44:22"}"#;

        let kept = prune_deleted(&mut doc, previous, &names(&["S", "M"])).unwrap();

        assert_eq!(kept.encode().unwrap(), r#"{"S":"12:12","M":"33:33"}"#);
        // ids were never in this document, so removal is a no-op
        assert!(doc.removed().is_empty());
    }

    #[test]
    fn never_saved_snapshot_removes_nothing() {
        let mut doc = MemoryDocument::new();
        components(&mut doc, 2);

        let kept = prune_deleted(&mut doc, "", &names(&[])).unwrap();

        assert!(kept.is_empty());
        assert!(doc.removed().is_empty());
        assert_eq!(doc.node_count(), 2);
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let mut doc = MemoryDocument::new();
        assert!(prune_deleted(&mut doc, "{S:", &names(&["S"])).is_err());
    }

    #[test]
    fn shared_ids_are_removed_once() {
        let mut doc = MemoryDocument::new();
        let ids = components(&mut doc, 1);
        let snapshot: VariantSnapshot = [
            ("L".to_string(), ids.clone()),
            ("XL".to_string(), ids.clone()),
        ]
        .into_iter()
        .collect();

        prune_snapshot(&mut doc, snapshot, &names(&[]));

        assert_eq!(doc.removed(), ids.as_slice());
    }

    #[test]
    fn renamed_entries_are_rekeyed() {
        let ids: Vec<NodeId> = ["1:1", "1:2", "1:3"].into_iter().map(NodeId::from).collect();
        let snapshot: VariantSnapshot = [
            ("S".to_string(), vec![ids[0].clone()]),
            ("M".to_string(), vec![ids[1].clone()]),
            ("L".to_string(), vec![ids[2].clone()]),
        ]
        .into_iter()
        .collect();
        let links: VariantRefs = IndexMap::from([
            ("Small".to_string(), vec![ids[0].clone()]),
            ("M".to_string(), vec![ids[1].clone()]),
        ]);

        let followed = follow_renames(snapshot, &links);

        assert_eq!(followed.names().collect::<Vec<_>>(), vec!["Small", "M", "L"]);
        assert_eq!(followed.get("Small"), Some(&ids[0..1]));
    }

    #[test]
    fn rename_onto_known_name_is_not_followed() {
        let ids: Vec<NodeId> = ["1:1", "1:2"].into_iter().map(NodeId::from).collect();
        let snapshot: VariantSnapshot = [
            ("S".to_string(), vec![ids[0].clone()]),
            ("M".to_string(), vec![ids[1].clone()]),
        ]
        .into_iter()
        .collect();
        // the primitive for S was renamed to M, the old M primitive is gone
        let links: VariantRefs = IndexMap::from([("M".to_string(), vec![ids[0].clone()])]);

        let followed = follow_renames(snapshot, &links);

        assert_eq!(followed.names().collect::<Vec<_>>(), vec!["S", "M"]);
        assert_eq!(followed.get("S"), Some(&[][..]));
        // the old M component is still listed under M, but nothing links it
        assert_eq!(followed.get("M"), Some(&ids[1..2]));
    }

    #[test]
    fn unlinked_ids_of_kept_entries_are_removed() {
        let mut doc = MemoryDocument::new();
        let ids = components(&mut doc, 3);
        let snapshot: VariantSnapshot = [
            ("S".to_string(), vec![ids[0].clone()]),
            ("M".to_string(), vec![ids[1].clone(), ids[2].clone()]),
        ]
        .into_iter()
        .collect();
        // S was renamed to M, which dropped the old M component
        let links: VariantRefs = IndexMap::from([("M".to_string(), vec![ids[0].clone()])]);

        let followed = follow_renames(snapshot, &links);
        let kept = prune_snapshot(&mut doc, followed, &names(&["M"]));
        let kept = prune_unlinked(&mut doc, kept, &links);

        assert_eq!(doc.removed(), &ids[1..3]);
        assert_eq!(kept.names().collect::<Vec<_>>(), vec!["M"]);
        assert_eq!(kept.get("M"), Some(&[][..]));
        assert_eq!(doc.node_kind(&ids[0]), Some(NodeKind::Component));
    }

    #[test]
    fn linked_entries_are_untouched() {
        let mut doc = MemoryDocument::new();
        let ids = components(&mut doc, 2);
        let snapshot: VariantSnapshot = [("S".to_string(), ids.clone())].into_iter().collect();
        let links: VariantRefs = IndexMap::from([("S".to_string(), ids.clone())]);

        let kept = prune_unlinked(&mut doc, snapshot.clone(), &links);

        assert_eq!(kept, snapshot);
        assert!(doc.removed().is_empty());
    }
}
