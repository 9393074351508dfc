//! Errors that end a plugin action

use morfeo_core::{DocumentError, LedgerError, NotifyOptions, SliceCategory};
use thiserror::Error;

/// A fatal condition. The controller shows its message to the user exactly
/// once, as an error notification.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("The '{0}' page already exists")]
    ThemePageExists(String),

    #[error("Cannot find a '{0}' page. Please use 'Create theme page' function of the plugin before sync")]
    ThemePageMissing(String),

    #[error("The default {category} are invalid: {reason}")]
    InvalidDefaultTheme {
        category: SliceCategory,
        reason: String,
    },

    #[error("Cannot find all the slices. If you delete some of them, please undo that change")]
    SliceFrameMissing(SliceCategory),

    #[error("Detected some empty slices. Please keep at least one variant for each slice")]
    EmptySliceFrame(SliceCategory),

    #[error("Cannot find the Box primitive component")]
    BoxComponentMissing,

    #[error("The saved {category} variants are corrupted, please undo your last change")]
    CorruptSnapshot {
        category: SliceCategory,
        #[source]
        source: LedgerError,
    },

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SyncError {
    /// Options of the single error notification
    pub fn notify_options(&self) -> NotifyOptions {
        match self {
            Self::ThemePageExists(_)
            | Self::ThemePageMissing(_)
            | Self::InvalidDefaultTheme { .. }
            | Self::CorruptSnapshot { .. } => NotifyOptions::error().with_timeout(5000),
            Self::SliceFrameMissing(_) | Self::EmptySliceFrame(_) => {
                NotifyOptions::error().with_timeout(3000)
            }
            Self::BoxComponentMissing | Self::Document(_) | Self::Ledger(_) | Self::Encode(_) => {
                NotifyOptions::error()
            }
        }
    }

    /// Whether the plugin closes after reporting
    pub fn closes_plugin(&self) -> bool {
        matches!(self, Self::SliceFrameMissing(_))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
