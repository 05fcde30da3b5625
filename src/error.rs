//! Error types for color parsing and persistence.

use std::path::PathBuf;

/// A hex color string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("hex color `{0}` must have 3 or 6 digits")]
    InvalidLength(String),
    #[error("hex color `{0}` contains a non-hex digit")]
    InvalidDigit(String),
}

/// Failure reading or writing persisted picker state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
    #[error("failed to access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
