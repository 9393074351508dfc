//! Morfeo plugin
//!
//! Controllers for the actions the plugin UI sends:
//! - `create-morfeo-theme`: build the theme page and the Box component set
//! - `sync-theme`: reconcile theme page edits with the Box variants
//! - `generate-theme`: post the document's colors and typography for download
//! - `close-plugin`
//!
//! Every handler takes the host as `&mut impl Host`, see [`Controller::handle`].

pub mod actions;
pub mod constants;
pub mod controller;
pub mod create_page;
pub mod error;
pub mod generate;
pub mod settings;
pub mod sync;

pub use actions::{PluginMessage, UiMessage};
pub use controller::{Controller, Outcome};
pub use create_page::{create_theme_page, ThemePage};
pub use error::{Result, SyncError};
pub use generate::generate_theme;
pub use settings::{DefaultTheme, PluginSettings};
pub use sync::{sync_theme, SyncReport};
