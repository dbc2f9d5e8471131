//! Error types for the Spamsift library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`SpamsiftError`] enum. Errors that matter to callers have dedicated
//! variants: [`SpamsiftError::NotTrained`] for inference against a
//! classifier that has never completed a training pass, and
//! [`SpamsiftError::EmptyCorpus`] for training input under which class
//! priors and conditional probabilities are undefined.
//!
//! # Examples
//!
//! ```
//! use spamsift::error::{Result, SpamsiftError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpamsiftError::not_trained("train() has not been called"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Spamsift operations.
///
/// Uses the `thiserror` crate for automatic `Error` trait implementation and
/// provides convenient constructor methods for creating specific error types.
#[derive(Error, Debug)]
pub enum SpamsiftError {
    /// I/O errors (reading message files, training data, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Prediction or evaluation requested before a successful training pass.
    #[error("Classifier not trained: {0}")]
    NotTrained(String),

    /// Training corpus is empty, or one of the two classes has no examples.
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    /// Analysis-related errors (normalization, tokenization).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Corpus provider errors (generation, loading).
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SpamsiftError.
pub type Result<T> = std::result::Result<T, SpamsiftError>;

impl SpamsiftError {
    /// Create a new not-trained error.
    pub fn not_trained<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::NotTrained(msg.into())
    }

    /// Create a new empty-corpus error.
    pub fn empty_corpus<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::EmptyCorpus(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::Analysis(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::Corpus(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::InvalidOperation(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::Other(msg.into())
    }
}
