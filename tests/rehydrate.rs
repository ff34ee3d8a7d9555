#![cfg(not(target_arch = "wasm32"))]

use folio_wasm::fonts::{FontWeight, TextTransform, FONTS, LINE_HEIGHTS};
use folio_wasm::TypographySettings;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// A persisted blob holding any subset of the fields, plus the record it should yield.
fn persisted() -> impl Strategy<Value = (Value, TypographySettings)> {
    (
        proptest::option::of(proptest::sample::select(FONTS)),
        proptest::option::of(proptest::sample::select(FontWeight::ALL.to_vec())),
        proptest::option::of(50u16..=150),
        proptest::option::of(-5i32..=20),
        proptest::option::of(proptest::sample::select(LINE_HEIGHTS.to_vec())),
        proptest::option::of(proptest::sample::select(TextTransform::ALL.to_vec())),
        any::<bool>(),
    )
        .prop_map(|(font, weight, size, spacing, line_height, transform, with_class)| {
            let mut blob = Map::new();
            let mut expected = TypographySettings::default();
            if let Some(font) = font {
                blob.insert("fontFamily".into(), json!(font.name));
                if with_class {
                    blob.insert("fontClass".into(), json!(font.class));
                }
                expected = expected.with_font(&font);
            }
            if let Some(weight) = weight {
                blob.insert("fontWeight".into(), json!(weight.value()));
                expected.font_weight = weight;
            }
            if let Some(size) = size {
                blob.insert("fontSize".into(), json!(size));
                expected.font_size = size;
            }
            if let Some(hundredths) = spacing {
                let em = f64::from(hundredths) / 100.0;
                blob.insert("letterSpacing".into(), json!(em));
                expected.letter_spacing = em;
            }
            if let Some(line_height) = line_height {
                blob.insert("lineHeight".into(), json!(line_height));
                expected.line_height = line_height;
            }
            if let Some(transform) = transform {
                blob.insert("textTransform".into(), json!(transform.css()));
                expected.text_transform = transform;
            }
            (Value::Object(blob), expected)
        })
}

proptest! {
    #[test]
    fn rehydrate_overlays_persisted_fields_on_defaults((blob, expected) in persisted()) {
        let raw = blob.to_string();
        let settings = TypographySettings::rehydrate(&raw).expect("valid blob");
        prop_assert_eq!(settings, expected);
    }

    #[test]
    fn truncated_blobs_never_panic(cut in 1usize..40) {
        let raw = TypographySettings::default().to_storage_json().expect("serializes");
        let cut = cut.min(raw.len() - 1);
        prop_assert!(TypographySettings::rehydrate(&raw[..cut]).is_err());
    }
}
