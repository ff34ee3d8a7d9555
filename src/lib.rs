#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod background;
pub mod config;
pub mod error;
pub mod fonts;
pub mod page;
pub mod panel;
pub mod ports;
pub mod settings;
pub mod shader;
pub mod wave;

pub use background::{Background, GraphicsHost, Phase, Renderer, Strategy};
pub use config::{AppConfig, BackgroundConfig};
pub use error::{ConfigError, PortError, RenderError, SettingsError};
pub use panel::SettingsPanel;
pub use settings::TypographySettings;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
