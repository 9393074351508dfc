//! Non-fatal sync diagnostics
//!
//! A bad slice primitive never stops a sync pass. The reconciler records what
//! was wrong here and moves on to the next entry.

use indexmap::IndexMap;
use thiserror::Error;

use crate::category::SliceCategory;
use crate::document::NodeKind;
use crate::naming::NameError;

/// Prefix for user-facing diagnostic messages
pub const WARNING_MARKER: &str = "⚠️";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    WrongElementType,
    MixedSliceValues,
    DuplicatedSliceName,
    InvalidSliceName,
}

/// A slice primitive that was skipped, and why
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("{name} on {category} is a {found} element, only {expected} elements are allowed")]
    WrongElementType {
        category: SliceCategory,
        name: String,
        expected: NodeKind,
        found: NodeKind,
    },

    #[error("Mixed values are not allowed on slices ({name} on {category})")]
    MixedSliceValues {
        category: SliceCategory,
        name: String,
    },

    #[error("The {name} variant on {category} already exists, please use a unique name")]
    DuplicatedSliceName {
        category: SliceCategory,
        name: String,
    },

    #[error("{name:?} on {category} cannot be used as a variant name: {reason}")]
    InvalidSliceName {
        category: SliceCategory,
        name: String,
        reason: NameError,
    },
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::WrongElementType { .. } => DiagnosticKind::WrongElementType,
            Self::MixedSliceValues { .. } => DiagnosticKind::MixedSliceValues,
            Self::DuplicatedSliceName { .. } => DiagnosticKind::DuplicatedSliceName,
            Self::InvalidSliceName { .. } => DiagnosticKind::InvalidSliceName,
        }
    }
}

/// Per-run collector, grouped by kind in first-seen order
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: IndexMap<DiagnosticKind, Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(kind = ?diagnostic.kind(), "{diagnostic}");
        self.entries
            .entry(diagnostic.kind())
            .or_default()
            .push(diagnostic);
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> &[Diagnostic] {
        self.entries
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One warning-prefixed message per diagnostic
    pub fn messages(&self) -> Vec<String> {
        self.iter()
            .map(|diagnostic| format!("{WARNING_MARKER} {diagnostic}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_kind_and_prefixes_messages() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::MixedSliceValues {
            category: SliceCategory::Radius,
            name: "S".into(),
        });
        diagnostics.push(Diagnostic::DuplicatedSliceName {
            category: SliceCategory::BorderWidth,
            name: "M".into(),
        });
        diagnostics.push(Diagnostic::MixedSliceValues {
            category: SliceCategory::Radius,
            name: "L".into(),
        });

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.of_kind(DiagnosticKind::MixedSliceValues).len(), 2);
        assert!(diagnostics.of_kind(DiagnosticKind::WrongElementType).is_empty());
        assert_eq!(
            diagnostics.messages(),
            vec![
                "⚠️ Mixed values are not allowed on slices (S on Radii)",
                "⚠️ Mixed values are not allowed on slices (L on Radii)",
                "⚠️ The M variant on Border widths already exists, please use a unique name",
            ]
        );
    }
}
