//! Reference ledger between slice variants and generated components
//!
//! In memory, links are ordered id lists. Only at the persistence boundary do
//! they become `"/#/"`-joined strings: one per slice primitive (its plugin
//! data) and a JSON object per slice category on the theme page.

use indexmap::IndexMap;

use crate::document::NodeId;
use crate::error::LedgerError;

/// Separator between ids in a persisted link string
pub const LINK_DELIMITER: &str = "/#/";

/// Variant name to the components it participates in, for one slice
pub type VariantRefs = IndexMap<String, Vec<NodeId>>;

/// Join ids into the persisted link string
pub fn encode_refs(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(LINK_DELIMITER)
}

/// Parse a persisted link string. The empty string means "no links".
pub fn decode_refs(raw: &str) -> Vec<NodeId> {
    raw.split(LINK_DELIMITER)
        .filter(|id| !id.is_empty())
        .map(NodeId::from)
        .collect()
}

/// Inverse index from `(slice, variant)` to generated component ids
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RefLedger {
    slices: IndexMap<String, VariantRefs>,
}

impl RefLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` to the entry for `(slice, variant)`
    pub fn record(&mut self, slice: &str, variant: &str, id: NodeId) {
        self.slices
            .entry(slice.to_string())
            .or_default()
            .entry(variant.to_string())
            .or_default()
            .push(id);
    }

    /// Ids recorded for `(slice, variant)` in creation order
    pub fn refs(&self, slice: &str, variant: &str) -> &[NodeId] {
        self.slices
            .get(slice)
            .and_then(|variants| variants.get(variant))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn slice(&self, slice: &str) -> Option<&VariantRefs> {
        self.slices.get(slice)
    }

    /// Persisted form of one entry
    pub fn encoded(&self, slice: &str, variant: &str) -> Option<String> {
        self.slices
            .get(slice)
            .and_then(|variants| variants.get(variant))
            .map(|ids| encode_refs(ids))
    }

    /// Page-level snapshot for one slice; empty if nothing was recorded
    pub fn snapshot(&self, slice: &str) -> VariantSnapshot {
        self.slices
            .get(slice)
            .map(|variants| VariantSnapshot {
                entries: variants.clone(),
            })
            .unwrap_or_default()
    }

    pub fn slice_names(&self) -> impl Iterator<Item = &str> {
        self.slices.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Variant name to owned component ids, persisted per slice category
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariantSnapshot {
    entries: IndexMap<String, Vec<NodeId>>,
}

impl VariantSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the page-level JSON. The empty string means "never saved".
    pub fn decode(raw: &str) -> Result<Self, LedgerError> {
        if raw.is_empty() {
            return Ok(Self::default());
        }
        let parsed: IndexMap<String, String> = serde_json::from_str(raw)?;
        Ok(parsed
            .into_iter()
            .map(|(name, ids)| (name, decode_refs(&ids)))
            .collect())
    }

    /// Encode as a JSON object of link strings
    pub fn encode(&self) -> Result<String, LedgerError> {
        let raw: IndexMap<&str, String> = self
            .entries
            .iter()
            .map(|(name, ids)| (name.as_str(), encode_refs(ids)))
            .collect();
        Ok(serde_json::to_string(&raw)?)
    }

    /// Insert or replace an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, ids: Vec<NodeId>) {
        self.entries.insert(name.into(), ids);
    }

    pub fn get(&self, name: &str) -> Option<&[NodeId]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<NodeId>> {
        self.entries.shift_remove(name)
    }

    /// Overlay `other` on top of `self`; `other` wins on shared names
    pub fn merge(&mut self, other: VariantSnapshot) {
        for (name, ids) in other.entries {
            self.entries.insert(name, ids);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NodeId])> {
        self.entries
            .iter()
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<NodeId>)> for VariantSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, Vec<NodeId>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for VariantSnapshot {
    type Item = (String, Vec<NodeId>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
