//! Error types for the nomenclature crate
//!
//! The catalog itself never fails towards its caller: missing files, missing
//! bodies and malformed lines are absorbed into load reports. These errors
//! only surface at the outer edges (settings, locale tables, body registry
//! files and host module wiring).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nomenclature operations
pub type Result<T> = std::result::Result<T, NomenclatureError>;

/// Errors raised outside the absorbing catalog core
#[derive(Error, Debug)]
pub enum NomenclatureError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Color string is not of the `r,g,b` form
    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    /// A draw order refers to a module nobody registered
    #[error("Unknown module: {name}")]
    UnknownModule { name: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<NomenclatureError>,
    },
}

impl NomenclatureError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        NomenclatureError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        NomenclatureError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unknown module error
    pub fn unknown_module(name: impl Into<String>) -> Self {
        NomenclatureError::UnknownModule { name: name.into() }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
