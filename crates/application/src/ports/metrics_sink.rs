//! Metrics sink port

use trackprobe_domain::MetricRecord;

/// Errors reported by a metrics sink.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// The store could not be reached.
    #[error("metrics transport error: {0}")]
    Transport(String),

    /// The store answered with an error status.
    #[error("metrics store rejected write with status {status}: {message}")]
    Rejected {
        /// HTTP status of the write call.
        status: u16,
        /// Response body.
        message: String,
    },
}

/// Port persisting latency records as timestamped points.
pub trait MetricsSink {
    /// Persists one record.
    ///
    /// # Errors
    /// Returns an error if the record could not be stored.
    fn record(&self, record: &MetricRecord) -> Result<(), MetricsError>;
}
