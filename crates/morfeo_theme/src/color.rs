//! Paint style normalization

use indexmap::IndexMap;
use morfeo_core::{Paint, PaintStyle, Rgb};

use crate::names::parse_name;

/// CSS `rgba()` for a host color with channels in `0.0..=1.0`
pub fn to_css(color: Rgb, opacity: f32) -> String {
    format!(
        "rgba({},{},{},{})",
        channel(color.r),
        channel(color.g),
        channel(color.b),
        opacity
    )
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Color of a style whose first paint layer is solid. Layers above it are
/// ignored.
pub fn solid_color(style: &PaintStyle) -> Option<String> {
    match style.paints.first() {
        Some(Paint::Solid { color, opacity }) => Some(to_css(*color, opacity.unwrap_or(1.0))),
        _ => None,
    }
}

/// Theme colors keyed by camelized style name.
///
/// Styles whose first paint is not solid are skipped. On a key collision
/// the later style wins.
pub fn normalize_colors(styles: &[PaintStyle]) -> IndexMap<String, String> {
    let mut colors = IndexMap::with_capacity(styles.len());
    for style in styles {
        match solid_color(style) {
            Some(css) => {
                colors.insert(parse_name(&style.name), css);
            }
            None => {
                tracing::debug!(
                    style = %style.name,
                    layers = style.paints.len(),
                    "skipping paint style without a solid first layer"
                );
            }
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn style(name: &str, paints: Vec<Paint>) -> PaintStyle {
        PaintStyle {
            id: format!("S:{name}"),
            name: name.to_string(),
            description: String::new(),
            paints,
        }
    }

    fn solid(r: f32, g: f32, b: f32, opacity: Option<f32>) -> Paint {
        Paint::Solid {
            color: Rgb::new(r, g, b),
            opacity,
        }
    }

    #[test]
    fn solid_styles_become_rgba() {
        let colors = normalize_colors(&[
            style("Primary/Light blue", vec![solid(0.0, 0.5, 1.0, None)]),
            style("Overlay", vec![solid(0.0, 0.0, 0.0, Some(0.5))]),
        ]);

        assert_eq!(
            colors,
            IndexMap::from([
                ("primary.LightBlue".to_string(), "rgba(0,128,255,1)".to_string()),
                ("overlay".to_string(), "rgba(0,0,0,0.5)".to_string()),
            ])
        );
    }

    #[test]
    fn stacked_paints_use_the_first_layer() {
        let colors = normalize_colors(&[
            style("Stack", vec![solid(1.0, 1.0, 1.0, None), solid(0.0, 0.0, 0.0, Some(0.2))]),
            style("Tinted", vec![solid(1.0, 0.0, 0.0, Some(0.8)), Paint::Unsupported]),
        ]);

        assert_eq!(
            colors,
            IndexMap::from([
                ("stack".to_string(), "rgba(255,255,255,1)".to_string()),
                ("tinted".to_string(), "rgba(255,0,0,0.8)".to_string()),
            ])
        );
    }

    #[test]
    fn unsupported_first_layers_are_skipped() {
        let colors = normalize_colors(&[
            style("Gradient", vec![Paint::Unsupported]),
            style("Over solid", vec![Paint::Unsupported, solid(0.0, 0.0, 0.0, None)]),
            style("Empty", vec![]),
        ]);
        assert!(colors.is_empty());
    }
}
