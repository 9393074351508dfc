//! Theme meta posted to the UI for download

use indexmap::IndexMap;
use morfeo_core::{PaintStyle, TextStyle};
use serde::Serialize;

use crate::color::normalize_colors;
use crate::typography::{extract_typography, Typography};

/// Portable theme description built from local document styles
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeMeta {
    pub colors: IndexMap<String, String>,
    #[serde(flatten)]
    pub typography: Typography,
}

impl ThemeMeta {
    pub fn from_styles(paints: &[PaintStyle], texts: &[TextStyle]) -> Self {
        let meta = Self {
            colors: normalize_colors(paints),
            typography: extract_typography(texts),
        };
        tracing::info!(
            colors = meta.colors.len(),
            font_sizes = meta.typography.font_sizes.len(),
            "built theme meta"
        );
        meta
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
