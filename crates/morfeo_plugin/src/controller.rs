//! Routes UI actions to their handlers

use morfeo_core::Host;
use morfeo_theme::ThemeMeta;

use crate::actions::PluginMessage;
use crate::create_page::{create_theme_page, ThemePage};
use crate::error::Result;
use crate::generate::generate_theme;
use crate::settings::{DefaultTheme, PluginSettings};
use crate::sync::{sync_theme, SyncReport};

/// Result of a handled action
#[derive(Clone, Debug)]
pub enum Outcome {
    Generated(ThemeMeta),
    Created(ThemePage),
    Synced(SyncReport),
    Closed,
}

/// Plugin entry point: one action at a time against an injected host
#[derive(Clone, Debug, Default)]
pub struct Controller {
    settings: PluginSettings,
    theme: DefaultTheme,
}

impl Controller {
    pub fn new(settings: PluginSettings, theme: DefaultTheme) -> Self {
        Self { settings, theme }
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Run `message`. A fatal error is shown to the user once before it is
    /// returned.
    pub fn handle<H>(&self, host: &mut H, message: PluginMessage) -> Result<Outcome>
    where
        H: Host + ?Sized,
    {
        tracing::debug!(action = message.as_str(), "handling plugin message");

        let result = match message {
            PluginMessage::GenerateTheme => generate_theme(host).map(Outcome::Generated),
            PluginMessage::CreateMorfeoTheme => {
                create_theme_page(host, &self.settings, &self.theme).map(Outcome::Created)
            }
            PluginMessage::SyncTheme => sync_theme(host, &self.settings).map(Outcome::Synced),
            PluginMessage::ClosePlugin => {
                host.close_plugin();
                Ok(Outcome::Closed)
            }
        };

        if let Err(err) = &result {
            tracing::error!(action = message.as_str(), "{err}");
            host.notify(&err.to_string(), err.notify_options());
            if err.closes_plugin() {
                host.close_plugin();
            }
        }
        result
    }
}
