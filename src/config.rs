//! Page configuration.
//!
//! Every field has a default, so a page without a config block (or with a
//! partial one) gets the stock behaviour. Keys are camelCase to match the JSON
//! a page author writes by hand.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Storage key the typography record lives under.
pub const DEFAULT_STORAGE_KEY: &str = "typography-settings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub log_level: log::Level,
    pub storage_key: String,
    pub sidebar_open: bool,
    pub background: BackgroundConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: log::Level::Info,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            sidebar_open: true,
            background: BackgroundConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Tunables of the wave background, shared by the shader and the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundConfig {
    /// Time added per animation frame.
    pub time_step: f32,
    pub x_scale: f32,
    pub y_scale: f32,
    pub distortion: f32,
    /// Half-height in pixels of the fallback glow.
    pub glow_spread: u32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            time_step: 0.01,
            x_scale: 1.0,
            y_scale: 0.5,
            distortion: 0.05,
            glow_spread: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"sidebarOpen": false, "background": {"distortion": 0.1}}"#)
            .expect("valid config");
        assert!(!config.sidebar_open);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.background.distortion, 0.1);
        assert_eq!(config.background.time_step, 0.01);
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let config = AppConfig::from_json(r#"{"logLevel": "debug"}"#).expect("valid config");
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(AppConfig::from_json("{not json").is_err());
    }
}
