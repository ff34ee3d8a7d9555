//! Static option tables for the typography sidebar.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontCategory {
    Display,
    Sans,
    Serif,
}

impl FontCategory {
    pub const ALL: [FontCategory; 3] = [FontCategory::Display, FontCategory::Sans, FontCategory::Serif];

    pub fn label(self) -> &'static str {
        match self {
            FontCategory::Display => "Display",
            FontCategory::Sans => "Sans Serif",
            FontCategory::Serif => "Serif",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontOption {
    /// CSS family name, also the value persisted as `fontFamily`.
    pub name: &'static str,
    /// Stylesheet class that applies the family.
    pub class: &'static str,
    pub label: &'static str,
    pub category: FontCategory,
}

const fn font(
    name: &'static str,
    class: &'static str,
    label: &'static str,
    category: FontCategory,
) -> FontOption {
    FontOption { name, class, label, category }
}

pub static FONTS: &[FontOption] = &[
    font("Syne", "font-syne", "Syne", FontCategory::Display),
    font("Space Grotesk", "font-space-grotesk", "Space Grotesk", FontCategory::Display),
    font("Outfit", "font-outfit", "Outfit", FontCategory::Display),
    font("DM Sans", "font-dm-sans", "DM Sans", FontCategory::Sans),
    font("Plus Jakarta Sans", "font-jakarta", "Jakarta Sans", FontCategory::Sans),
    font("Manrope", "font-manrope", "Manrope", FontCategory::Sans),
    font("Inter", "font-inter", "Inter", FontCategory::Sans),
    font("Poppins", "font-poppins", "Poppins", FontCategory::Sans),
    font("Montserrat", "font-montserrat", "Montserrat", FontCategory::Sans),
    font("Playfair Display", "font-playfair", "Playfair", FontCategory::Serif),
];

/// Looks a family up by its persisted name.
pub fn find(name: &str) -> Option<&'static FontOption> {
    FONTS.iter().find(|f| f.name == name)
}

pub fn by_category(category: FontCategory) -> impl Iterator<Item = &'static FontOption> {
    FONTS.iter().filter(move |f| f.category == category)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum FontWeight {
    Light = 300,
    Regular = 400,
    Medium = 500,
    Semibold = 600,
    Bold = 700,
    Extrabold = 800,
}

impl FontWeight {
    pub const ALL: [FontWeight; 6] = [
        FontWeight::Light,
        FontWeight::Regular,
        FontWeight::Medium,
        FontWeight::Semibold,
        FontWeight::Bold,
        FontWeight::Extrabold,
    ];

    pub fn value(self) -> u16 {
        self as u16
    }

    pub fn label(self) -> &'static str {
        match self {
            FontWeight::Light => "Light",
            FontWeight::Regular => "Regular",
            FontWeight::Medium => "Medium",
            FontWeight::Semibold => "Semibold",
            FontWeight::Bold => "Bold",
            FontWeight::Extrabold => "Extrabold",
        }
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        FontWeight::ALL
            .into_iter()
            .find(|w| w.value() == value)
            .ok_or_else(|| format!("unsupported font weight {value}"))
    }
}

impl From<FontWeight> for u16 {
    fn from(weight: FontWeight) -> Self {
        weight.value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Capitalize,
    Lowercase,
}

impl TextTransform {
    pub const ALL: [TextTransform; 4] = [
        TextTransform::None,
        TextTransform::Uppercase,
        TextTransform::Capitalize,
        TextTransform::Lowercase,
    ];

    /// CSS keyword, identical to the serialized form.
    pub fn css(self) -> &'static str {
        match self {
            TextTransform::None => "none",
            TextTransform::Uppercase => "uppercase",
            TextTransform::Capitalize => "capitalize",
            TextTransform::Lowercase => "lowercase",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextTransform::None => "Aa",
            TextTransform::Uppercase => "AA",
            TextTransform::Capitalize => "Ab",
            TextTransform::Lowercase => "aa",
        }
    }
}

pub const LINE_HEIGHTS: [f64; 4] = [1.2, 1.5, 1.75, 2.0];

/// Inclusive slider bounds plus step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// Font size in percent of the base size.
pub const FONT_SIZE_RANGE: SliderRange = SliderRange { min: 50.0, max: 150.0, step: 5.0 };

/// Letter spacing in em.
pub const LETTER_SPACING_RANGE: SliderRange = SliderRange { min: -0.05, max: 0.2, step: 0.01 };
