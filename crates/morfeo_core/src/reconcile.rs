//! Sync reconciliation of slice primitives against generated components
//!
//! Each category frame on the theme page holds one primitive per variant. A
//! primitive carries its own link string pointing at the Box components it
//! takes part in. Reconciling a category:
//!
//! - pushes each primitive's current value and name onto its linked components
//! - splits primitives into `existing` (linked) and `added` (need components)
//! - records a [`Diagnostic`] for every primitive it has to skip, keeping
//!   its stored links so its components are not swept
//!
//! Entries are processed in frame order and later entries see earlier ones, so
//! the first of two same-named primitives wins.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::category::SliceCategory;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::document::{Document, Measure, NodeId, NodeKind, PluginData};
use crate::error::DocumentError;
use crate::ledger::{decode_refs, encode_refs, VariantRefs};
use crate::naming::{rename_in_composite, validate_variant_name};

/// A child of a category frame, read from the document
#[derive(Clone, Debug, PartialEq)]
pub enum SliceEntry {
    /// Element of the category's accepted kind
    Primitive {
        id: NodeId,
        name: String,
        value: Measure,
        refs: Vec<NodeId>,
    },
    /// Anything else dropped into the frame
    Foreign {
        id: NodeId,
        name: String,
        kind: NodeKind,
    },
}

/// Read the children of a category frame in order.
///
/// Link strings are only read for primitives of the accepted kind; they are
/// stored under `namespace` keyed by the primitive's own id.
pub fn read_slice_entries<D>(
    doc: &D,
    category: SliceCategory,
    frame: &NodeId,
    namespace: &str,
) -> Vec<SliceEntry>
where
    D: Document + PluginData + ?Sized,
{
    doc.children(frame)
        .into_iter()
        .filter_map(|id| {
            let kind = doc.node_kind(&id)?;
            let name = doc.node_name(&id).unwrap_or_default();
            if kind != category.accepted_kind() {
                return Some(SliceEntry::Foreign { id, name, kind });
            }
            let value = doc
                .style_value(&id, category.style_key())
                .unwrap_or(Measure::Value(0.0));
            let refs = decode_refs(&doc.plugin_data(&id, namespace, id.as_str()));
            Some(SliceEntry::Primitive {
                id,
                name,
                value,
                refs,
            })
        })
        .collect()
}

/// Outcome of reconciling one category
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconciled {
    /// Variants linked to at least one live component
    pub existing: IndexMap<String, f32>,
    /// Variants that still need components
    pub added: IndexMap<String, f32>,
    /// Live component ids of each existing variant
    pub links: VariantRefs,
    /// Primitive node of every accepted variant
    pub primitives: IndexMap<String, NodeId>,
    /// Stored links of primitives skipped by a diagnostic, by name
    pub skipped: VariantRefs,
}

impl Reconciled {
    fn is_classified(&self, name: &str) -> bool {
        self.existing.contains_key(name) || self.added.contains_key(name)
    }

    fn skip(&mut self, name: &str, refs: &[NodeId]) {
        self.skipped
            .entry(name.to_string())
            .or_default()
            .extend(refs.iter().cloned());
    }

    /// Names whose components must survive the sweep: accepted variants and
    /// skipped primitives alike
    pub fn retained_names(&self) -> FxHashSet<&str> {
        self.primitives
            .keys()
            .chain(self.skipped.keys())
            .map(String::as_str)
            .collect()
    }

    /// Live links plus the stored links of skipped primitives. A sweep guided
    /// by these never removes a component a primitive still points at.
    pub fn retained_links(&self) -> VariantRefs {
        let mut retained = self.links.clone();
        for (name, refs) in &self.skipped {
            retained
                .entry(name.clone())
                .or_default()
                .extend(refs.iter().cloned());
        }
        retained
    }

    /// Link lists to store back on the primitives: previously linked ids that
    /// are still live components, followed by `new_refs` for that variant.
    pub fn merged_links<D>(&self, doc: &D, new_refs: Option<&VariantRefs>) -> VariantRefs
    where
        D: Document + ?Sized,
    {
        self.primitives
            .keys()
            .map(|name| {
                let mut ids: Vec<NodeId> = self
                    .links
                    .get(name)
                    .into_iter()
                    .flatten()
                    .filter(|id| doc.node_kind(id) == Some(NodeKind::Component))
                    .cloned()
                    .collect();
                if let Some(fresh) = new_refs.and_then(|refs| refs.get(name)) {
                    for id in fresh {
                        if !ids.contains(id) {
                            ids.push(id.clone());
                        }
                    }
                }
                (name.clone(), ids)
            })
            .collect()
    }
}

/// Classify the entries of one category and push their state onto the
/// components they link to.
pub fn reconcile<D>(
    doc: &mut D,
    category: SliceCategory,
    entries: &[SliceEntry],
    diagnostics: &mut Diagnostics,
) -> Result<Reconciled, DocumentError>
where
    D: Document + ?Sized,
{
    let mut out = Reconciled::default();

    for entry in entries {
        let (id, name, value, refs) = match entry {
            SliceEntry::Foreign { name, kind, .. } => {
                diagnostics.push(Diagnostic::WrongElementType {
                    category,
                    name: name.clone(),
                    expected: category.accepted_kind(),
                    found: *kind,
                });
                continue;
            }
            SliceEntry::Primitive {
                id,
                name,
                value,
                refs,
            } => (id, name, value, refs),
        };

        let value = match value {
            Measure::Value(value) => *value,
            Measure::Mixed => {
                diagnostics.push(Diagnostic::MixedSliceValues {
                    category,
                    name: name.clone(),
                });
                out.skip(name, refs);
                continue;
            }
        };

        if let Err(reason) = validate_variant_name(name) {
            diagnostics.push(Diagnostic::InvalidSliceName {
                category,
                name: name.clone(),
                reason,
            });
            out.skip(name, refs);
            continue;
        }

        if out.is_classified(name) {
            diagnostics.push(Diagnostic::DuplicatedSliceName {
                category,
                name: name.clone(),
            });
            out.skip(name, refs);
            continue;
        }

        out.primitives.insert(name.clone(), id.clone());

        if refs.is_empty() {
            out.added.insert(name.clone(), value);
            continue;
        }

        let mut live = Vec::with_capacity(refs.len());
        for component in refs {
            if doc.node_kind(component) != Some(NodeKind::Component) {
                tracing::debug!(%component, variant = %name, "skipping stale reference");
                continue;
            }
            doc.set_style_value(component, category.style_key(), value)?;
            if let Some(current) = doc.node_name(component) {
                let renamed = rename_in_composite(&current, category.slice_name(), name);
                if renamed != current {
                    doc.set_node_name(component, &renamed)?;
                }
            }
            live.push(component.clone());
        }

        if live.is_empty() {
            tracing::warn!(
                variant = %name,
                %category,
                "no linked component survives, regenerating"
            );
            out.added.insert(name.clone(), value);
        } else {
            out.existing.insert(name.clone(), value);
            out.links.insert(name.clone(), live);
        }
    }

    tracing::debug!(
        %category,
        existing = out.existing.len(),
        added = out.added.len(),
        "reconciled slices"
    );
    Ok(out)
}

/// Store each primitive's link string. Primitives without links are left as is.
pub fn store_links<D>(
    doc: &mut D,
    namespace: &str,
    primitives: &IndexMap<String, NodeId>,
    links: &VariantRefs,
) -> Result<(), DocumentError>
where
    D: PluginData + ?Sized,
{
    for (name, primitive) in primitives {
        if let Some(ids) = links.get(name) {
            doc.set_plugin_data(primitive, namespace, primitive.as_str(), &encode_refs(ids))?;
        }
    }
    Ok(())
}
