//! Error types for configuration and scanning.

use std::path::PathBuf;

use thiserror::Error;

/// Errors detected while building the sweep configuration.
///
/// Every variant is fatal: it is reported once at startup and no traversal
/// happens afterwards.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The match expression was empty or whitespace.
    #[error("Missing match pattern (--match)")]
    EmptyPattern,

    /// The match expression failed to compile.
    #[error("Invalid match pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// The match expression has no capture group with the expected name.
    #[error(
        "Match pattern has no capture group named {group:?}; define one with (?P<{group}>...)"
    )]
    MissingDateGroup { group: String },

    /// Retention window was zero or negative.
    #[error("Retention window must be a positive number of days (--keep), got {keep}")]
    InvalidKeep { keep: i64 },

    /// A required builder field was never set.
    #[error("Missing configuration field: {field}")]
    MissingField { field: String },

    /// The config file could not be read.
    #[error("Cannot read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Invalid config file {path}: {message}")]
    ParseFile { path: PathBuf, message: String },
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::MissingField {
            field: err.field_name().to_string(),
        }
    }
}

/// Errors that abort a traversal.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error reported by the directory walker without an underlying I/O error.
    #[error("Walk error at {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::Io { path, .. }
            | Self::Walk { path, .. } => path,
        }
    }
}
