//! Error types for config persistence and tagging.

use std::path::PathBuf;
use thiserror::Error;

/// Config file load/save errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory and no explicit `--config`
    #[error("could not determine the config directory; pass --config")]
    MissingConfigDir,

    /// IO error while reading or writing the config file
    #[error("config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization failure
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Thumbnail fetch and ID3 write errors.
#[derive(Debug, Error)]
pub enum TagError {
    /// HTTP request for the thumbnail failed
    #[error("thumbnail request failed: {0}")]
    Thumbnail(#[from] ureq::Error),

    /// ID3 read/write failure
    #[error(transparent)]
    Id3(#[from] id3::Error),
}

/// Result type alias for config operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
