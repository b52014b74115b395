//! Error types for gesturedash-core operations.

use std::path::PathBuf;

/// All errors that can occur in dashboard core operations.
///
/// Inbound event handling never produces these: malformed or partial events
/// are absorbed with defaults. Errors surface only from preference persistence
/// and outbound command transports.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    #[error("Preference directory not found")]
    PreferenceDirNotFound,

    #[error("Preference file malformed: {path}: {details}")]
    PreferenceMalformed { path: PathBuf, details: String },

    #[error("Preference write failed: {path}: {source}")]
    PreferenceWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid detection settings: {0}")]
    InvalidSettings(String),

    #[error("Command transport failed: {command}: {details}")]
    Transport { command: String, details: String },
}

/// Convenience type alias for Results using DashError.
pub type Result<T> = std::result::Result<T, DashError>;
