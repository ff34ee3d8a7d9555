//! The typography record shared between the sidebar and the hero text.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::SettingsError;
use crate::fonts::{self, FontOption, FontWeight, TextTransform};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographySettings {
    pub font_family: String,
    pub font_class: String,
    pub font_weight: FontWeight,
    /// Percent of the base size.
    pub font_size: u16,
    /// In em.
    pub letter_spacing: f64,
    pub line_height: f64,
    pub text_transform: TextTransform,
}

impl Default for TypographySettings {
    fn default() -> Self {
        Self {
            font_family: "Syne".to_owned(),
            font_class: "font-syne".to_owned(),
            font_weight: FontWeight::Regular,
            font_size: 100,
            letter_spacing: 0.0,
            line_height: 1.5,
            text_transform: TextTransform::None,
        }
    }
}

impl TypographySettings {
    /// Parses a persisted record over the defaults.
    ///
    /// Missing fields keep their default and unknown keys are ignored. The
    /// font class is always re-derived from the catalog entry of the
    /// persisted family, so a stale class never survives a reload. A family
    /// the catalog no longer carries falls back to the default family alone.
    pub fn rehydrate(raw: &str) -> Result<Self, SettingsError> {
        let settings: TypographySettings = serde_json::from_str(raw)?;
        match fonts::find(&settings.font_family) {
            Some(font) => Ok(settings.with_font(font)),
            None => {
                log::warn!("persisted font {:?} is not in the catalog", settings.font_family);
                let Self { font_family, font_class, .. } = Self::default();
                Ok(Self { font_family, font_class, ..settings })
            }
        }
    }

    /// Copy of `self` with the family and its class replaced.
    pub fn with_font(&self, font: &FontOption) -> Self {
        Self {
            font_family: font.name.to_owned(),
            font_class: font.class.to_owned(),
            ..self.clone()
        }
    }

    pub fn to_storage_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Human-readable export with unit-suffixed size and spacing.
    pub fn to_clipboard_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&ClipboardExport::from(self))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClipboardExport<'a> {
    font_family: &'a str,
    font_weight: FontWeight,
    font_size: String,
    letter_spacing: String,
    #[serde(serialize_with = "shortest_number")]
    line_height: f64,
    text_transform: TextTransform,
}

/// Whole values print without a fraction: `2`, not `2.0`.
fn shortest_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl<'a> From<&'a TypographySettings> for ClipboardExport<'a> {
    fn from(s: &'a TypographySettings) -> Self {
        Self {
            font_family: &s.font_family,
            font_weight: s.font_weight,
            font_size: format!("{}%", s.font_size),
            letter_spacing: format!("{:.2}em", round_hundredths(s.letter_spacing)),
            line_height: s.line_height,
            text_transform: s.text_transform,
        }
    }
}

/// Rounds slider noise such as `0.12000000000000001` away; `-0.0` prints as `0`.
pub(crate) fn round_hundredths(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
