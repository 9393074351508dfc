//! `generate-theme`: offer the document's styles as a theme file

use morfeo_core::Host;
use morfeo_theme::ThemeMeta;

use crate::actions::UiMessage;
use crate::error::Result;

/// Build the theme meta from local styles and post it to the UI as a
/// `download-file` message.
pub fn generate_theme<H>(host: &mut H) -> Result<ThemeMeta>
where
    H: Host + ?Sized,
{
    let meta = ThemeMeta::from_styles(&host.local_paint_styles(), &host.local_text_styles());
    let message = UiMessage::DownloadFile { meta: meta.clone() };
    host.post_message(serde_json::to_value(&message)?);
    Ok(meta)
}
