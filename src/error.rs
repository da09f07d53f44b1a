//! Error types for the Saffron engine.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SaffronError`] enum. Most failures inside training and ranking are turned
//! into diagnostics and explicit outcome values instead of errors; the variants
//! here cover the conditions that must reach the caller.
//!
//! # Examples
//!
//! ```
//! use saffron::error::{Result, SaffronError};
//!
//! fn lookup(id: i64) -> Result<()> {
//!     Err(SaffronError::not_found(format!("product {id}")))
//! }
//!
//! assert!(matches!(lookup(7), Err(SaffronError::NotFound(_))));
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Saffron operations.
#[derive(Error, Debug)]
pub enum SaffronError {
    /// I/O errors (artifact files, stopword lists, training input).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary artifact encoding errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Analysis-related errors (bad filter pattern, dictionary format).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Storage backend errors.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument passed by the caller.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced entity is absent from the trained corpus.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Training input is missing required fields.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Saving or loading a trained artifact failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Error with attached context, shown with its whole cause chain.
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`SaffronError`].
pub type Result<T> = std::result::Result<T, SaffronError>;

impl SaffronError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SaffronError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SaffronError::Storage(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SaffronError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SaffronError::InvalidArgument(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        SaffronError::NotFound(msg.into())
    }

    /// Create a new malformed input error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        SaffronError::MalformedInput(msg.into())
    }

    /// Create a new persistence error.
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        SaffronError::Persistence(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        SaffronError::Serialization(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SaffronError::Other(msg.into())
    }

    /// Whether this error is the "identifier not indexed" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SaffronError::NotFound(_))
    }
}

impl From<bincode::Error> for SaffronError {
    fn from(err: bincode::Error) -> Self {
        SaffronError::Serialization(err.to_string())
    }
}

impl From<regex::Error> for SaffronError {
    fn from(err: regex::Error) -> Self {
        SaffronError::Analysis(err.to_string())
    }
}
