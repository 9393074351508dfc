//! Cartesian products of slice variants

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::document::StyleKey;
use crate::naming::{compose_name, decompose_name, PAIR_SEPARATOR, SEGMENT_SEPARATOR};

/// A named axis of design variation
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    /// Stable name, also the prefix of every composite segment
    pub name: String,
    /// Attribute this slice drives on generated components
    pub style_key: StyleKey,
    /// Variant name to value, in insertion order
    pub variants: IndexMap<String, f32>,
}

impl Slice {
    pub fn new(name: impl Into<String>, style_key: StyleKey) -> Self {
        Self {
            name: name.into(),
            style_key,
            variants: IndexMap::new(),
        }
    }

    /// Builder-style variant insertion
    pub fn variant(mut self, name: impl Into<String>, value: f32) -> Self {
        self.variants.insert(name.into(), value);
        self
    }

    pub fn with_variants<I, S>(name: impl Into<String>, style_key: StyleKey, variants: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            style_key,
            variants: variants.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}

/// One point of the product, ready to be materialized
#[derive(Clone, Debug, PartialEq)]
pub struct VariantRecord {
    /// Composite name, e.g. `Radius=S, Border width=M`
    pub name: String,
    /// One value per style key
    pub values: IndexMap<StyleKey, f32>,
}

impl VariantRecord {
    pub fn value(&self, key: StyleKey) -> Option<f32> {
        self.values.get(&key).copied()
    }

    /// `(slice, variant)` pairs encoded in the name
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        decompose_name(&self.name)
    }
}

/// Full Cartesian product of `slices`.
///
/// Earlier slices vary slowest; each slice's variants keep insertion order.
/// A slice without variants collapses the product to nothing, as does an empty
/// slice list.
pub fn generate_combinations(slices: &[Slice]) -> Vec<VariantRecord> {
    let Some((first, rest)) = slices.split_first() else {
        return Vec::new();
    };

    let seed: Vec<VariantRecord> = first
        .variants
        .iter()
        .map(|(variant, value)| VariantRecord {
            name: compose_name([(first.name.as_str(), variant.as_str())]),
            values: IndexMap::from([(first.style_key, *value)]),
        })
        .collect();

    rest.iter().fold(seed, |partials, slice| {
        let mut next = Vec::with_capacity(partials.len() * slice.variants.len());
        for partial in &partials {
            for (variant, value) in &slice.variants {
                let mut record = partial.clone();
                record.name = format!(
                    "{}{SEGMENT_SEPARATOR}{}{PAIR_SEPARATOR}{variant}",
                    record.name, slice.name
                );
                record.values.insert(slice.style_key, *value);
                next.push(record);
            }
        }
        next
    })
}

/// Variants of one slice split by whether they already have components
#[derive(Clone, Debug, PartialEq)]
pub struct SliceDelta {
    pub name: String,
    pub style_key: StyleKey,
    pub existing: IndexMap<String, f32>,
    pub added: IndexMap<String, f32>,
}

impl SliceDelta {
    pub fn new(
        name: impl Into<String>,
        style_key: StyleKey,
        existing: IndexMap<String, f32>,
        added: IndexMap<String, f32>,
    ) -> Self {
        Self {
            name: name.into(),
            style_key,
            existing,
            added,
        }
    }

    /// Existing variants followed by added ones
    pub fn all_variants(&self) -> IndexMap<String, f32> {
        let mut all = self.existing.clone();
        all.extend(self.added.iter().map(|(n, v)| (n.clone(), *v)));
        all
    }

    fn axis(&self, variants: IndexMap<String, f32>) -> Slice {
        Slice {
            name: self.name.clone(),
            style_key: self.style_key,
            variants,
        }
    }
}

/// Combinations that involve at least one added variant, each exactly once.
///
/// For pivot slice `i`: slices before it contribute all variants, slice `i`
/// only its added ones, slices after it only existing ones.
pub fn generate_incremental(slices: &[SliceDelta]) -> Vec<VariantRecord> {
    let mut records = Vec::new();
    for (pivot, pivot_slice) in slices.iter().enumerate() {
        if pivot_slice.added.is_empty() {
            continue;
        }
        let axes: Vec<Slice> = slices
            .iter()
            .enumerate()
            .map(|(i, delta)| match i.cmp(&pivot) {
                Ordering::Less => delta.axis(delta.all_variants()),
                Ordering::Equal => delta.axis(delta.added.clone()),
                Ordering::Greater => delta.axis(delta.existing.clone()),
            })
            .collect();
        records.extend(generate_combinations(&axes));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn radius() -> Slice {
        Slice::new("Radius", StyleKey::CornerRadius)
            .variant("S", 3.0)
            .variant("M", 6.0)
            .variant("L", 10.0)
    }

    fn border_width() -> Slice {
        Slice::new("Border width", StyleKey::StrokeWeight)
            .variant("none", 0.0)
            .variant("XS", 0.5)
    }

    fn names(records: &[VariantRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn single_slice_seeds_one_record_per_variant() {
        let records = generate_combinations(&[radius()]);
        assert_eq!(names(&records), vec!["Radius=S", "Radius=M", "Radius=L"]);
        assert_eq!(records[2].value(StyleKey::CornerRadius), Some(10.0));
        assert_eq!(records[2].value(StyleKey::StrokeWeight), None);
    }

    #[test]
    fn product_orders_earlier_slices_outermost() {
        let records = generate_combinations(&[radius(), border_width()]);
        assert_eq!(
            names(&records),
            vec![
                "Radius=S, Border width=none",
                "Radius=S, Border width=XS",
                "Radius=M, Border width=none",
                "Radius=M, Border width=XS",
                "Radius=L, Border width=none",
                "Radius=L, Border width=XS",
            ]
        );
        let last = &records[5];
        assert_eq!(last.value(StyleKey::CornerRadius), Some(10.0));
        assert_eq!(last.value(StyleKey::StrokeWeight), Some(0.5));
        assert_eq!(last.pairs(), vec![("Radius", "L"), ("Border width", "XS")]);
    }

    #[test]
    fn later_slice_overwrites_shared_style_key() {
        let outer = Slice::new("Outer", StyleKey::CornerRadius).variant("a", 1.0);
        let inner = Slice::new("Inner", StyleKey::CornerRadius).variant("b", 2.0);
        let records = generate_combinations(&[outer, inner]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].values.len(), 1);
        assert_eq!(records[0].value(StyleKey::CornerRadius), Some(2.0));
    }

    #[test]
    fn empty_slice_yields_no_combinations() {
        let empty = Slice::new("Border width", StyleKey::StrokeWeight);
        assert!(generate_combinations(&[radius(), empty.clone()]).is_empty());
        assert!(generate_combinations(&[empty, radius()]).is_empty());
        assert!(generate_combinations(&[]).is_empty());
    }

    #[test]
    fn incremental_covers_only_new_tuples() {
        let radius = SliceDelta::new(
            "Radius",
            StyleKey::CornerRadius,
            IndexMap::from([("S".to_string(), 3.0)]),
            IndexMap::from([("M".to_string(), 6.0)]),
        );
        let border = SliceDelta::new(
            "Border width",
            StyleKey::StrokeWeight,
            IndexMap::from([("XS".to_string(), 0.5)]),
            IndexMap::from([("L".to_string(), 3.0)]),
        );

        let records = generate_incremental(&[radius, border]);

        assert_eq!(
            names(&records),
            vec![
                "Radius=M, Border width=XS",
                "Radius=S, Border width=L",
                "Radius=M, Border width=L",
            ]
        );
    }

    #[test]
    fn incremental_without_additions_is_empty() {
        let radius = SliceDelta::new(
            "Radius",
            StyleKey::CornerRadius,
            IndexMap::from([("S".to_string(), 3.0)]),
            IndexMap::new(),
        );
        assert!(generate_incremental(&[radius]).is_empty());
    }
}
