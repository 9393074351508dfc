//! Names and keys shared with documents created by earlier plugin versions

use morfeo_core::SliceCategory;

/// Plugin data namespace for every stored key
pub const PLUGIN_DATA_NAMESPACE: &str = "figmaToMorfeo";

/// Page key holding the id of the Box component set
pub const BOX_REF_KEY: &str = "box-ref-id";

pub const DEFAULT_THEME_PAGE_NAME: &str = "Morfeo theme";

/// Frame wrapping the Box component set, and the set itself
pub const BOX_NAME: &str = "Box";

pub const THEME_PAGE_CREATED: &str = "Theme page created!";
pub const COMPONENTS_UPDATED: &str = "Components updated!";

/// Page key of the persisted variant snapshot of a category
pub fn snapshot_key(category: SliceCategory) -> &'static str {
    match category {
        SliceCategory::Radius => "current-radii-variants",
        SliceCategory::BorderWidth => "current-border-width-variants",
    }
}

/// Initial `(width, height)` of a category frame
pub fn frame_size(category: SliceCategory) -> (f32, f32) {
    match category {
        SliceCategory::Radius => (380.0, 140.0),
        SliceCategory::BorderWidth => (620.0, 140.0),
    }
}

pub const BOX_FRAME_SIZE: (f32, f32) = (140.0, 140.0);
