//! Error types for the helpdesk library.
//!
//! The query classifier and the clarification session store are total and never
//! produce errors. [`HelpdeskError`] covers the edges of the system: configuration
//! loading, calls into the retrieval and answer-generation collaborators, and
//! command-line I/O.
//!
//! # Examples
//!
//! ```
//! use helpdesk::error::{HelpdeskError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HelpdeskError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for helpdesk operations.
#[derive(Error, Debug)]
pub enum HelpdeskError {
    /// I/O errors (config files, knowledge base fixtures, terminal).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The retrieval collaborator failed
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// The answer-generation collaborator failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Session maintenance errors (sweeper lifecycle)
    #[error("Session error: {0}")]
    Session(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with HelpdeskError.
pub type Result<T> = std::result::Result<T, HelpdeskError>;

impl HelpdeskError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HelpdeskError::Config(msg.into())
    }

    /// Create a new retrieval error.
    pub fn retrieval<S: Into<String>>(msg: S) -> Self {
        HelpdeskError::Retrieval(msg.into())
    }

    /// Create a new generation error.
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        HelpdeskError::Generation(msg.into())
    }

    /// Create a new session error.
    pub fn session<S: Into<String>>(msg: S) -> Self {
        HelpdeskError::Session(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        HelpdeskError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HelpdeskError::Other(msg.into())
    }
}
