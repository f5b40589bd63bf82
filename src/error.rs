use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavError>;

/// Errors surfaced by the navigation library
#[derive(Debug, Error)]
pub enum NavError {
    /// A gallery needs at least one exhibit to navigate between
    #[error("gallery has no exhibits")]
    EmptyGallery,

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No GPU adapter or device could be created; the viewer cannot start
    #[error("render backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl NavError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Read a file into a string, tagging failures with the path
pub(crate) fn read_to_string(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| NavError::Io {
        path: path.display().to_string(),
        source,
    })
}
