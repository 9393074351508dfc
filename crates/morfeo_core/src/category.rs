//! Slice categories editable on the theme page

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::{NodeKind, StyleKey};

/// A family of slice primitives sharing one frame, element kind and attribute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SliceCategory {
    /// Rectangles whose corner radius defines a radius token
    Radius,
    /// Lines whose stroke weight defines a border-width token
    BorderWidth,
}

impl SliceCategory {
    /// Categories in the order their slices compose component names
    pub const ALL: [SliceCategory; 2] = [SliceCategory::Radius, SliceCategory::BorderWidth];

    /// Slice name used in composite component names
    pub fn slice_name(self) -> &'static str {
        match self {
            Self::Radius => "Radius",
            Self::BorderWidth => "Border width",
        }
    }

    /// Name of the theme-page frame holding the primitives
    pub fn frame_name(self) -> &'static str {
        match self {
            Self::Radius => "Radii",
            Self::BorderWidth => "Border widths",
        }
    }

    pub fn accepted_kind(self) -> NodeKind {
        match self {
            Self::Radius => NodeKind::Rectangle,
            Self::BorderWidth => NodeKind::Line,
        }
    }

    pub fn style_key(self) -> StyleKey {
        match self {
            Self::Radius => StyleKey::CornerRadius,
            Self::BorderWidth => StyleKey::StrokeWeight,
        }
    }
}

impl fmt::Display for SliceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.frame_name())
    }
}
