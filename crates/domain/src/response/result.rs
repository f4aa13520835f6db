//! Uniform outcome of one HTTP call
//!
//! Every call attempt, whatever went wrong, produces a [`RequestResult`].
//! Callers never see a transport error: failures are folded into a sentinel
//! body of the form `{"message": <reason>}`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Sentinel message for a response that carried no body.
pub const NO_BODY_CONTENT: &str = "No body content";
/// Sentinel message for a 4xx/5xx response that carried no body.
pub const HTTP_ERROR: &str = "HTTP Error";
/// Sentinel message when the connection could not be established.
pub const CONNECTION_ERROR: &str = "Connection Error";
/// Sentinel message for any other transport failure.
pub const REQUEST_FAILED: &str = "Request Failed";

/// Which path produced a [`RequestResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A 1xx/2xx/3xx response was received.
    Success,
    /// A 4xx/5xx response was received. Not a failure of the harness.
    HttpError,
    /// DNS, refused connection, or a timeout while establishing the channel.
    ConnectionError,
    /// Any other transport failure (bad URL, encoding, unreadable body).
    RequestFailed,
}

impl Outcome {
    /// Returns the sentinel message used when this outcome has no body.
    #[must_use]
    pub const fn sentinel_message(self) -> &'static str {
        match self {
            Self::Success => NO_BODY_CONTENT,
            Self::HttpError => HTTP_ERROR,
            Self::ConnectionError => CONNECTION_ERROR,
            Self::RequestFailed => REQUEST_FAILED,
        }
    }

    /// Returns true when a response object was received from the server.
    #[must_use]
    pub const fn has_response(self) -> bool {
        matches!(self, Self::Success | Self::HttpError)
    }
}

/// Builds the `{"message": <reason>}` sentinel body.
#[must_use]
pub fn sentinel(message: &str) -> Value {
    json!({ "message": message })
}

/// Normalised result of one HTTP call.
///
/// Invariants:
/// - `body` is always present: parsed JSON or a sentinel.
/// - `status_code` is `None` exactly when no status line was received.
/// - `headers` is empty when no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestResult {
    /// Parsed JSON body or sentinel.
    pub body: Value,
    /// HTTP status, or `None` when unknown.
    pub status_code: Option<u16>,
    /// Response headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Path that produced this result.
    pub outcome: Outcome,
}

impl RequestResult {
    /// Creates a result from a received response.
    ///
    /// The outcome is `HttpError` for 4xx/5xx and `Success` otherwise. An
    /// absent body is replaced by the outcome's sentinel.
    #[must_use]
    pub fn from_response(status: u16, headers: HashMap<String, String>, body: Option<Value>) -> Self {
        let outcome = if (400..600).contains(&status) {
            Outcome::HttpError
        } else {
            Outcome::Success
        };
        Self {
            body: body.unwrap_or_else(|| sentinel(outcome.sentinel_message())),
            status_code: Some(status),
            headers,
            outcome,
        }
    }

    /// Creates the result for a connection-level failure.
    #[must_use]
    pub fn connection_error() -> Self {
        Self {
            body: sentinel(CONNECTION_ERROR),
            status_code: None,
            headers: HashMap::new(),
            outcome: Outcome::ConnectionError,
        }
    }

    /// Creates the result for a generic transport failure.
    ///
    /// When the failure happened after the status line was read (for example
    /// an undecodable body) the status and headers are kept.
    #[must_use]
    pub fn request_failed(status: Option<u16>, headers: HashMap<String, String>) -> Self {
        Self {
            body: sentinel(REQUEST_FAILED),
            status_code: status,
            headers,
            outcome: Outcome::RequestFailed,
        }
    }

    /// Returns the sentinel message if the body is exactly a sentinel.
    #[must_use]
    pub fn sentinel_message(&self) -> Option<&str> {
        let object = self.body.as_object()?;
        if object.len() != 1 {
            return None;
        }
        object.get("message")?.as_str()
    }

    /// Returns the `id` field of the body, whether encoded as string or number.
    #[must_use]
    pub fn body_id(&self) -> Option<String> {
        match self.body.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Looks up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Renders the status for messages, `unknown` when absent.
    #[must_use]
    pub fn status_display(&self) -> String {
        self.status_code
            .map_or_else(|| "unknown".to_string(), |code| code.to_string())
    }
}
