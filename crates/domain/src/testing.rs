//! Validation failures.
//!
//! A failed check carries both the expected and the actual value so a report
//! can show them side by side.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The facet of a response a check looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCheck {
    /// Exact status code equality.
    StatusCode,
    /// Expected headers present in the response.
    Headers,
    /// Body conforms to the expected JSON Schema.
    Body,
}

impl ValidationCheck {
    /// Checks in the order they run.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::StatusCode, Self::Headers, Self::Body]
    }

    /// Get a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StatusCode => "status_code",
            Self::Headers => "headers",
            Self::Body => "body",
        }
    }
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Which check failed.
    pub check: ValidationCheck,
    /// Expected value (status, header map, or schema).
    pub expected: Value,
    /// Actual value observed.
    pub actual: Value,
}

impl ValidationFailure {
    /// Creates a failure for the given check.
    #[must_use]
    pub const fn new(check: ValidationCheck, expected: Value, actual: Value) -> Self {
        Self {
            check,
            expected,
            actual,
        }
    }

    /// Returns the assertion message.
    #[must_use]
    pub fn message(&self) -> String {
        match self.check {
            ValidationCheck::StatusCode => format!(
                "Expected Status Code: {} but received {}",
                self.expected,
                render_status(&self.actual)
            ),
            ValidationCheck::Headers => format!(
                "Expected headers: {} but received {}",
                self.expected, self.actual
            ),
            ValidationCheck::Body => format!(
                "Expected body: {} but received {}",
                self.expected, self.actual
            ),
        }
    }
}

fn render_status(value: &Value) -> String {
    if value.is_null() {
        "unknown".to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationFailure {}
