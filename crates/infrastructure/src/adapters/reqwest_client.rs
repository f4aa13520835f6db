//! Request executor implementation using reqwest.
//!
//! This adapter implements the `RequestExecutor` port with a blocking
//! `reqwest` client. The client is kept for the lifetime of the executor and
//! reused across calls as a connection session.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::HeaderMap;
use reqwest::Method;
use trackprobe_application::ports::RequestExecutor;
use trackprobe_domain::{ApiRequest, HttpMethod, RequestResult};

/// Errors raised while setting up the transport.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// HTTP executor backed by `reqwest::blocking::Client`.
///
/// Default configuration:
/// - No request timeout (a stalled server blocks the call)
/// - With a timeout, the same bound applies to connecting
/// - Transport default redirect policy
/// - User-Agent: "trackprobe/<version>"
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Creates an executor without a timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, ExecutorError> {
        Self::build(None)
    }

    /// Creates an executor that gives up on calls after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ExecutorError> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self, ExecutorError> {
        let mut builder = Client::builder()
            .user_agent(concat!("trackprobe/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout);
        // A timeout while connecting must surface as a connect error.
        if let Some(timeout) = timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn prepare(&self, request: &ApiRequest) -> RequestBuilder {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.as_str());

        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(&auth.login, Some(&auth.token));
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }

    /// Folds a received response into a result.
    fn from_response(url: &str, response: Response) -> RequestResult {
        let status = response.status().as_u16();
        let headers = Self::collect_headers(response.headers());

        if response.status().is_client_error() || response.status().is_server_error() {
            tracing::error!("HTTP Error: {status} for url: {url}");
        }

        let bytes = match response.bytes() {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::error!("Request Exception: failed to read body: {error}");
                return RequestResult::request_failed(Some(status), headers);
            }
        };

        match Self::decode_body(&bytes) {
            Ok(body) => RequestResult::from_response(status, headers, body),
            Err(error) => {
                tracing::error!("Request Exception: response body is not JSON: {error}");
                RequestResult::request_failed(Some(status), headers)
            }
        }
    }

    /// Parses a body as JSON; an empty body is `None`.
    fn decode_body(bytes: &[u8]) -> Result<Option<serde_json::Value>, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(bytes).map(Some)
    }

    /// Copies headers into a map, joining repeated names with `", "`.
    fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
        let mut collected: HashMap<String, String> = HashMap::with_capacity(headers.keys_len());
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            collected
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        collected
    }

    /// Maps a transport error to a sentinel result.
    fn from_error(error: &reqwest::Error) -> RequestResult {
        if error.is_connect() {
            tracing::error!("Connection Error: {error}");
            RequestResult::connection_error()
        } else {
            tracing::error!("Request Exception: {error}");
            RequestResult::request_failed(None, HashMap::new())
        }
    }
}

impl RequestExecutor for ReqwestExecutor {
    fn execute(&self, request: &ApiRequest) -> RequestResult {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let result = match self.prepare(request).send() {
            Ok(response) => Self::from_response(&request.url, response),
            Err(error) => Self::from_error(&error),
        };
        tracing::debug!(?result, "request finished");
        result
    }
}
