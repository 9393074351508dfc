//! Messages exchanged with the plugin UI

use morfeo_theme::ThemeMeta;
use serde::{Deserialize, Serialize};

/// Actions the UI can ask the plugin to run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    GenerateTheme,
    CreateMorfeoTheme,
    SyncTheme,
    ClosePlugin,
}

impl PluginMessage {
    pub const ALL: [PluginMessage; 4] = [
        PluginMessage::GenerateTheme,
        PluginMessage::CreateMorfeoTheme,
        PluginMessage::SyncTheme,
        PluginMessage::ClosePlugin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenerateTheme => "generate-theme",
            Self::CreateMorfeoTheme => "create-morfeo-theme",
            Self::SyncTheme => "sync-theme",
            Self::ClosePlugin => "close-plugin",
        }
    }

    /// Look up an action by its `type` tag
    pub fn from_type(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|message| message.as_str() == tag)
    }
}

/// Messages posted back to the UI
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    DownloadFile { meta: ThemeMeta },
}
