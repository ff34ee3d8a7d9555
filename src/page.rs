use crate::fonts::FONTS;
use crate::settings::{round_hundredths, TypographySettings};

/// Inline overrides the host page puts on the hero heading and tagline.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroStyle {
    pub font_class: String,
    pub declarations: Vec<(&'static str, String)>,
}

impl From<&TypographySettings> for HeroStyle {
    fn from(s: &TypographySettings) -> Self {
        // The stylesheet multiplies each element's base size by --type-scale.
        let declarations = vec![
            ("font-weight", s.font_weight.value().to_string()),
            ("--type-scale", (f64::from(s.font_size) / 100.0).to_string()),
            ("letter-spacing", format!("{}em", round_hundredths(s.letter_spacing))),
            ("line-height", s.line_height.to_string()),
            ("text-transform", s.text_transform.css().to_owned()),
        ];
        Self {
            font_class: s.font_class.clone(),
            declarations,
        }
    }
}

/// Every class the catalog can put on an element, for swapping one out.
pub fn font_classes() -> impl Iterator<Item = &'static str> {
    FONTS.iter().map(|f| f.class)
}
