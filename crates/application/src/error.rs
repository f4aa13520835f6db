//! Application error types

use thiserror::Error;
use trackprobe_domain::{DomainError, ValidationFailure};

use crate::ports::ExpectationError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The expectation for a scenario could not be loaded.
    #[error("expectation error: {0}")]
    Expectation(#[from] ExpectationError),

    /// A response did not match its expectation.
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    /// A fixture could not create the resource it guards.
    #[error("fixture error: {0}")]
    Fixture(String),

    /// A payload could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl ApplicationError {
    /// Returns true if this is an assertion failure rather than a harness error.
    #[must_use]
    pub const fn is_validation_failure(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
