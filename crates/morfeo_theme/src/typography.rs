//! Typography scales collected from local text styles

use morfeo_core::{FontName, LetterSpacing, LineHeight, TextStyle};
use serde::Serialize;

use crate::scale::{assign_names, Scale, ScaleValue};

/// A scale split by unit: pixel values and percentages
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UnitScale {
    pub absolute: Scale,
    pub relative: Scale,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_sizes: Scale,
    pub letter_spacings: UnitScale,
    pub line_heights: UnitScale,
    pub fonts: Vec<FontName>,
}

/// Distinct values in first-seen order
#[derive(Default)]
struct Collected {
    font_sizes: Vec<ScaleValue>,
    letter_spacing_absolute: Vec<ScaleValue>,
    letter_spacing_relative: Vec<ScaleValue>,
    line_height_absolute: Vec<ScaleValue>,
    line_height_relative: Vec<ScaleValue>,
    fonts: Vec<FontName>,
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Collect the distinct sizes, spacings, line heights and fonts of `styles`
/// and name each numeric set as a scale.
pub fn extract_typography(styles: &[TextStyle]) -> Typography {
    let mut collected = Collected::default();

    for style in styles {
        push_unique(&mut collected.fonts, style.font_name.clone());
        push_unique(&mut collected.font_sizes, ScaleValue::Value(style.font_size));

        match style.letter_spacing {
            LetterSpacing::Pixels { value } => {
                push_unique(&mut collected.letter_spacing_absolute, value.into())
            }
            LetterSpacing::Percent { value } => {
                push_unique(&mut collected.letter_spacing_relative, value.into())
            }
        }

        match style.line_height {
            LineHeight::Auto => push_unique(&mut collected.line_height_relative, ScaleValue::Auto),
            LineHeight::Pixels { value } => {
                push_unique(&mut collected.line_height_absolute, value.into())
            }
            LineHeight::Percent { value } => {
                push_unique(&mut collected.line_height_relative, value.into())
            }
        }
    }

    tracing::debug!(
        styles = styles.len(),
        fonts = collected.fonts.len(),
        "extracted typography"
    );

    Typography {
        font_sizes: assign_names(&collected.font_sizes, false),
        letter_spacings: UnitScale {
            absolute: assign_names(&collected.letter_spacing_absolute, false),
            relative: assign_names(&collected.letter_spacing_relative, true),
        },
        line_heights: UnitScale {
            absolute: assign_names(&collected.line_height_absolute, false),
            relative: assign_names(&collected.line_height_relative, true),
        },
        fonts: collected.fonts,
    }
}
