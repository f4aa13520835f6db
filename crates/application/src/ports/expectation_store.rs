//! Expectation store port
//!
//! Resolves a logical scenario name to its stored expectation document.

use std::path::PathBuf;

use trackprobe_domain::ExpectationDocument;

/// Errors that can occur while loading an expectation.
///
/// All of them are fatal for the scenario: without its oracle a test cannot
/// decide whether it passed.
#[derive(Debug, thiserror::Error)]
pub enum ExpectationError {
    /// No document exists for the name.
    #[error("Expectation not found: {0}")]
    NotFound(PathBuf),

    /// The name cannot be mapped to a file.
    #[error("Invalid expectation name: {0}")]
    InvalidName(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or misses required keys.
    #[error("Malformed expectation {name}: {message}")]
    Parse {
        /// Expectation name.
        name: String,
        /// Parser message.
        message: String,
    },

    /// The `body` entry is not a usable JSON Schema.
    #[error("Invalid schema in expectation {name}: {message}")]
    InvalidSchema {
        /// Expectation name.
        name: String,
        /// Schema compiler message.
        message: String,
    },
}

/// Repository trait for expectation documents.
pub trait ExpectationStore {
    /// Loads the expectation called `name`.
    ///
    /// # Errors
    /// Returns `ExpectationError::NotFound` if no document exists and
    /// `ExpectationError::Parse` if it cannot be read as an expectation.
    fn load(&self, name: &str) -> Result<ExpectationDocument, ExpectationError>;
}
