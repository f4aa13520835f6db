//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building requests or settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not one of GET, POST, PUT or DELETE.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header check mode name could not be recognised.
    #[error("unknown header check mode: {0}")]
    UnknownHeaderCheckMode(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
