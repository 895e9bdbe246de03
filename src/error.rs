use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or validating a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse settings")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}
