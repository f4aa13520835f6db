//! InfluxDB v2 line-protocol sink.

use reqwest::blocking::Client;
use trackprobe_application::ports::{MetricsError, MetricsSink};
use trackprobe_domain::{InfluxSettings, MetricRecord, RESPONSE_TIME_MEASUREMENT};
use url::Url;

/// Writes each record as one point to `/api/v2/write`.
#[derive(Debug, Clone)]
pub struct InfluxLineSink {
    client: Client,
    write_url: Url,
    token: String,
}

impl InfluxLineSink {
    /// Creates a sink for the configured organisation and bucket.
    ///
    /// # Errors
    /// Returns `MetricsError::Transport` if the URL is invalid or the client
    /// cannot be built.
    pub fn new(settings: &InfluxSettings) -> Result<Self, MetricsError> {
        let mut base = settings.url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let mut write_url = Url::parse(&base)
            .and_then(|base| base.join("api/v2/write"))
            .map_err(|e| MetricsError::Transport(format!("invalid InfluxDB URL: {e}")))?;
        write_url
            .query_pairs_mut()
            .append_pair("org", &settings.org)
            .append_pair("bucket", &settings.bucket)
            .append_pair("precision", "ns");

        let client = Client::builder()
            .build()
            .map_err(|e| MetricsError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            write_url,
            token: settings.token.clone(),
        })
    }

    /// Full write endpoint including query parameters.
    #[must_use]
    pub const fn write_url(&self) -> &Url {
        &self.write_url
    }
}

impl MetricsSink for InfluxLineSink {
    fn record(&self, record: &MetricRecord) -> Result<(), MetricsError> {
        let line = to_line_protocol(record);
        tracing::debug!(%line, "writing latency point");

        let response = self
            .client
            .post(self.write_url.clone())
            .header("Authorization", format!("Token {}", self.token))
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(line)
            .send()
            .map_err(|e| MetricsError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(MetricsError::Rejected {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            })
        }
    }
}

/// Renders a record as one InfluxDB line-protocol point.
#[must_use]
pub fn to_line_protocol(record: &MetricRecord) -> String {
    let mut line = format!(
        "{},url={},method={},status={},endpoint={} value={}",
        RESPONSE_TIME_MEASUREMENT,
        escape_tag(&record.url),
        escape_tag(record.method.as_str()),
        escape_tag(&record.status_tag()),
        escape_tag(&record.endpoint),
        record.latency_secs(),
    );
    if let Some(nanos) = record.timestamp.timestamp_nanos_opt() {
        line.push(' ');
        line.push_str(&nanos.to_string());
    }
    line
}

/// Escapes commas, spaces and equals signs in tag values.
fn escape_tag(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, ',' | ' ' | '=' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
