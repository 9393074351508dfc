use morfeo_core::{
    Document, FontName, LetterSpacing, LineHeight, MemoryDocument, Paint, PaintStyle, Rgb,
    TextStyle,
};
use morfeo_theme::ThemeMeta;
use pretty_assertions::assert_eq;
use serde_json::json;

fn document() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    doc.add_paint_style(PaintStyle {
        id: "S:1".into(),
        name: "Brand/Primary".into(),
        description: String::new(),
        paints: vec![Paint::Solid {
            color: Rgb::new(1.0, 0.0, 0.0),
            opacity: None,
        }],
    });
    doc.add_paint_style(PaintStyle {
        id: "S:2".into(),
        name: "Hero gradient".into(),
        description: String::new(),
        paints: vec![Paint::Unsupported],
    });
    doc.add_text_style(TextStyle {
        id: "S:3".into(),
        name: "Body".into(),
        font_name: FontName {
            family: "Inter".into(),
            style: "Regular".into(),
        },
        font_size: 16.0,
        letter_spacing: LetterSpacing::Percent { value: 0.0 },
        line_height: LineHeight::Auto,
    });
    doc
}

#[test]
fn meta_serializes_colors_and_flattened_typography() {
    let doc = document();
    let meta = ThemeMeta::from_styles(&doc.local_paint_styles(), &doc.local_text_styles());

    assert_eq!(
        meta.to_json().unwrap(),
        json!({
            "colors": { "brand.Primary": "rgba(255,0,0,1)" },
            "fontSizes": { "xs": 16.0 },
            "letterSpacings": { "absolute": {}, "relative": { "none": 0.0 } },
            "lineHeights": { "absolute": {}, "relative": { "auto": "auto" } },
            "fonts": [{ "family": "Inter", "style": "Regular" }],
        })
    );
}

#[test]
fn empty_document_gives_empty_meta() {
    let doc = MemoryDocument::new();
    let meta = ThemeMeta::from_styles(&doc.local_paint_styles(), &doc.local_text_styles());
    assert_eq!(meta, ThemeMeta::default());
}
