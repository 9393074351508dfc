//! Core error types

use thiserror::Error;

use crate::document::{NodeId, NodeKind};

/// Errors raised by a [`Document`](crate::Document) implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// No live node carries this id
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// The node exists but cannot take part in the requested operation
    #[error("Node {id} is a {found}, expected {expected}")]
    UnexpectedKind {
        id: NodeId,
        found: NodeKind,
        expected: NodeKind,
    },

    /// The requested parent/child relationship is not allowed
    #[error("Cannot append {child} to {parent}: {reason}")]
    InvalidHierarchy {
        parent: NodeId,
        child: NodeId,
        reason: String,
    },
}

/// Errors raised while decoding or encoding persisted ledger state
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The page-level snapshot is not a JSON object of strings
    #[error("Malformed variant snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Any failure surfaced by the core engine
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
