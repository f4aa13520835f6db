//! Harness Settings Domain Model
//!
//! Resolved once at process start and passed by reference to the components
//! that need it. Nothing in the harness reads ambient globals.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::expectation::HeaderCheckMode;
use crate::request::BasicAuth;

/// Default directory holding `<name>.json` expectation documents.
pub const DEFAULT_EXPECTATIONS_DIR: &str = "expectations";

/// Connection details for the InfluxDB v2 metrics store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluxSettings {
    /// Base URL, e.g. `http://localhost:8086`.
    pub url: String,
    /// Organisation name.
    #[serde(default = "default_influx_org")]
    pub org: String,
    /// Bucket receiving `response_time` points.
    #[serde(default = "default_influx_bucket")]
    pub bucket: String,
    /// API token with write access to the bucket.
    pub token: String,
}

fn default_influx_org() -> String {
    "APIAutomationTest".to_string()
}

fn default_influx_bucket() -> String {
    "JiraAPI".to_string()
}

impl fmt::Debug for InfluxSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfluxSettings")
            .field("url", &self.url)
            .field("org", &self.org)
            .field("bucket", &self.bucket)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Tracker objects the scenarios build on, which must already exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerFixtures {
    /// Project new issues are filed under.
    pub project_id: String,
    /// Issue type used for new issues.
    pub issue_type_id: String,
    /// Issue key that receives comments.
    pub comment_issue: String,
}

impl Default for TrackerFixtures {
    fn default() -> Self {
        Self {
            project_id: "10033".to_string(),
            issue_type_id: "10034".to_string(),
            comment_issue: "EXU-1".to_string(),
        }
    }
}

/// Everything the harness needs to talk to the tracker.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// REST API root, always ending in `/`
    /// (e.g. `https://acme.atlassian.net/rest/api/3/`).
    pub base_url: String,
    /// Basic auth login.
    pub login: String,
    /// Basic auth API token.
    pub token: String,
    /// Account id used as project lead when creating projects.
    #[serde(default)]
    pub account_id: String,
    /// Directory of expectation documents.
    #[serde(default = "default_expectations_dir")]
    pub expectations_dir: PathBuf,
    /// Optional per-request timeout. `None` means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Header facet semantics for the response validator.
    #[serde(default)]
    pub header_check: HeaderCheckMode,
    /// Metrics store; when absent records are only logged.
    #[serde(default)]
    pub influx: Option<InfluxSettings>,
    /// Pre-existing tracker objects.
    #[serde(default)]
    pub fixtures: TrackerFixtures,
}

fn default_expectations_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPECTATIONS_DIR)
}

impl ProbeSettings {
    /// Creates settings with defaults for everything but the credentials.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        login: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            login: login.into(),
            token: token.into(),
            account_id: String::new(),
            expectations_dir: default_expectations_dir(),
            timeout_secs: None,
            header_check: HeaderCheckMode::default(),
            influx: None,
            fixtures: TrackerFixtures::default(),
        }
    }

    /// Returns the basic credentials.
    #[must_use]
    pub fn auth(&self) -> BasicAuth {
        BasicAuth::new(&self.login, &self.token)
    }
}

impl fmt::Debug for ProbeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeSettings")
            .field("base_url", &self.base_url)
            .field("login", &self.login)
            .field("token", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("expectations_dir", &self.expectations_dir)
            .field("timeout_secs", &self.timeout_secs)
            .field("header_check", &self.header_check)
            .field("influx", &self.influx)
            .field("fixtures", &self.fixtures)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let settings = ProbeSettings::new("https://acme.atlassian.net/rest/api/3", "qa", "t");
        assert_eq!(settings.base_url, "https://acme.atlassian.net/rest/api/3/");
    }

    #[test]
    fn test_defaults() {
        let settings = ProbeSettings::new("http://localhost/", "qa", "t");
        assert_eq!(settings.expectations_dir, PathBuf::from("expectations"));
        assert_eq!(settings.timeout_secs, None);
        assert_eq!(settings.header_check, HeaderCheckMode::Subset);
        assert!(settings.influx.is_none());
        assert_eq!(settings.fixtures.comment_issue, "EXU-1");
    }

    #[test]
    fn test_debug_hides_tokens() {
        let mut settings = ProbeSettings::new("http://localhost/", "qa", "api-token-1");
        settings.influx = Some(InfluxSettings {
            url: "http://localhost:8086".to_string(),
            org: default_influx_org(),
            bucket: default_influx_bucket(),
            token: "influx-token-2".to_string(),
        });
        let debug = format!("{settings:?}");
        assert!(!debug.contains("api-token-1"));
        assert!(!debug.contains("influx-token-2"));
    }
}
