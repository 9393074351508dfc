//! Morfeo core
//!
//! The variant combination and synchronization engine behind the Morfeo theme
//! page:
//! - `combination`: Cartesian product of named slices into variant records
//! - `materialize`: turning records into document components plus a ref ledger
//! - `reconcile`: classifying edited slice primitives on sync
//! - `sweep`: removing components of deleted variants
//!
//! The host document is reached only through the traits in [`document`]. Tests
//! and the CLI use [`MemoryDocument`].

pub mod category;
pub mod combination;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod ledger;
pub mod materialize;
pub mod memory;
pub mod naming;
pub mod reconcile;
pub mod styles;
pub mod sweep;

pub use category::SliceCategory;
pub use combination::{
    generate_combinations, generate_incremental, Slice, SliceDelta, VariantRecord,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, WARNING_MARKER};
pub use document::{
    Document, Host, Measure, NodeId, NodeKind, Notifier, NotifyOptions, PluginData, StyleKey,
    UiBridge,
};
pub use error::{CoreError, DocumentError, LedgerError, Result};
pub use ledger::{decode_refs, encode_refs, RefLedger, VariantRefs, VariantSnapshot, LINK_DELIMITER};
pub use materialize::{materialize, Materialized};
pub use memory::{MemoryDocument, MemoryNode, Notification};
pub use naming::{
    compose_name, decompose_name, rename_in_composite, step_name, validate_variant_name, NameError,
};
pub use reconcile::{read_slice_entries, reconcile, store_links, Reconciled, SliceEntry};
pub use styles::{FontName, LetterSpacing, LineHeight, Paint, PaintStyle, Rgb, TextStyle};
pub use sweep::{follow_renames, prune_deleted, prune_snapshot, prune_unlinked};
