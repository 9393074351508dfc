//! Morfeo theme extraction
//!
//! Builds the portable theme description offered for download:
//! - **Colors**: paint styles with a solid first layer as `rgba()` strings
//! - **Typography**: font sizes, letter spacings, line heights and fonts,
//!   each numeric set named as a stepped scale (`xs`, `s`, `m`, ...)
//!
//! Style names are camelized into theme keys with [`parse_name`].

mod color;
mod meta;
mod names;
mod scale;
mod typography;

pub use color::{normalize_colors, solid_color, to_css};
pub use meta::ThemeMeta;
pub use names::parse_name;
pub use scale::{assign_names, Scale, ScaleValue, RELATIVE_SUFFIX};
pub use typography::{extract_typography, Typography, UnitScale};
