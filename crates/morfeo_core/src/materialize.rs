//! Turning combination records into document components

use crate::combination::VariantRecord;
use crate::document::{Document, NodeId, NodeKind};
use crate::error::DocumentError;
use crate::ledger::RefLedger;

/// Components created for a batch of records, with their ledger
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Materialized {
    /// New component ids, in record order
    pub instances: Vec<NodeId>,
    /// `(slice, variant)` to the new ids realizing it
    pub ledger: RefLedger,
}

/// Create one component per record and index it under each of its pairs.
///
/// The caller decides where the components end up (a fresh component set or
/// an existing one).
pub fn materialize<D>(doc: &mut D, records: &[VariantRecord]) -> Result<Materialized, DocumentError>
where
    D: Document + ?Sized,
{
    let mut out = Materialized {
        instances: Vec::with_capacity(records.len()),
        ledger: RefLedger::new(),
    };

    for record in records {
        let id = doc.create_node(NodeKind::Component, &record.name);
        for (key, value) in &record.values {
            doc.set_style_value(&id, *key, *value)?;
        }
        for (slice, variant) in record.pairs() {
            out.ledger.record(slice, variant, id.clone());
        }
        out.instances.push(id);
    }

    tracing::debug!(count = out.instances.len(), "materialized box variants");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combination::{generate_combinations, Slice};
    use crate::document::{Measure, StyleKey};
    use crate::ledger::encode_refs;
    use crate::memory::MemoryDocument;

    #[test]
    fn creates_components_with_record_values() {
        let mut doc = MemoryDocument::new();
        let records = generate_combinations(&[
            Slice::new("Radius", StyleKey::CornerRadius).variant("S", 3.0),
            Slice::new("Border width", StyleKey::StrokeWeight).variant("M", 2.0),
        ]);

        let out = materialize(&mut doc, &records).unwrap();

        assert_eq!(out.instances.len(), 1);
        let id = &out.instances[0];
        assert_eq!(doc.node_kind(id), Some(NodeKind::Component));
        assert_eq!(
            doc.node_name(id).as_deref(),
            Some("Radius=S, Border width=M")
        );
        assert_eq!(
            doc.style_value(id, StyleKey::CornerRadius),
            Some(Measure::Value(3.0))
        );
        assert_eq!(
            doc.style_value(id, StyleKey::StrokeWeight),
            Some(Measure::Value(2.0))
        );
    }

    #[test]
    fn shared_pair_links_every_instance_in_creation_order() {
        let mut doc = MemoryDocument::new();
        let records = generate_combinations(&[
            Slice::new("Radius", StyleKey::CornerRadius).variant("S", 3.0),
            Slice::new("Border width", StyleKey::StrokeWeight)
                .variant("none", 0.0)
                .variant("XS", 0.5)
                .variant("M", 2.0),
        ]);

        let out = materialize(&mut doc, &records).unwrap();

        assert_eq!(
            out.ledger.encoded("Radius", "S"),
            Some(encode_refs(&out.instances))
        );
        assert_eq!(out.ledger.refs("Border width", "XS"), &out.instances[1..2]);
    }
}
