//! Stored expectations for a named scenario.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;

/// The comparison oracle for one scenario, loaded from `<name>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectationDocument {
    /// JSON Schema the actual body must satisfy.
    pub body: Value,
    /// Exact expected status code.
    pub status_code: u16,
    /// Headers expected to be present in the actual response.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// How the header facet of an expectation is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderCheckMode {
    /// Every expected header must be present in the actual headers with an
    /// equal value. Names compare case-insensitively.
    #[default]
    Subset,
    /// Compares the expected headers against themselves, so the check always
    /// passes. Matches the behavior of the legacy suite.
    SelfCompare,
}

impl HeaderCheckMode {
    /// Returns the configuration name of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subset => "subset",
            Self::SelfCompare => "self_compare",
        }
    }
}

impl fmt::Display for HeaderCheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderCheckMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "subset" => Ok(Self::Subset),
            "self_compare" => Ok(Self::SelfCompare),
            _ => Err(DomainError::UnknownHeaderCheckMode(s.to_string())),
        }
    }
}
