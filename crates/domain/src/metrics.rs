//! Latency metric records.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::HttpMethod;

/// Measurement name every latency point is written under.
pub const RESPONSE_TIME_MEASUREMENT: &str = "response_time";

/// One timed call, shaped for a time-series store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Requested URL.
    pub url: String,
    /// Requested method.
    pub method: HttpMethod,
    /// Response status, `None` when no response arrived.
    pub status: Option<u16>,
    /// Logical endpoint group (`projects`, `issues`, `comments`).
    pub endpoint: String,
    /// Wall time spent in the call.
    pub latency: Duration,
    /// When the call finished.
    pub timestamp: DateTime<Utc>,
}

impl MetricRecord {
    /// Latency in fractional seconds.
    #[must_use]
    pub fn latency_secs(&self) -> f64 {
        self.latency.as_secs_f64()
    }

    /// Status rendered as a tag value.
    #[must_use]
    pub fn status_tag(&self) -> String {
        self.status
            .map_or_else(|| "unknown".to_string(), |status| status.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        let record = MetricRecord {
            url: "http://localhost/issue".to_string(),
            method: HttpMethod::Post,
            status: None,
            endpoint: "issues".to_string(),
            latency: Duration::from_millis(1500),
            timestamp: Utc::now(),
        };
        assert_eq!(record.status_tag(), "unknown");
        assert!((record.latency_secs() - 1.5).abs() < f64::EPSILON);
    }
}
