use thiserror::Error;

/// Failures while bringing up or driving a background renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0} context unavailable")]
    ContextUnavailable(&'static str),
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("shader program failed to link: {0}")]
    ProgramLink(String),
    #[error("could not allocate {0}")]
    Resource(&'static str),
    #[error("host error: {0}")]
    Host(String),
}

/// Failures reported by the storage and clipboard capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("{0} is unavailable")]
    Unavailable(&'static str),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("font {0:?} is not in the catalog")]
    UnknownFont(String),
}

#[derive(Debug, Error)]
#[error("malformed page config: {0}")]
pub struct ConfigError(#[from] pub serde_json::Error);
