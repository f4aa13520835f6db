//! Sink used when no metrics store is configured.

use trackprobe_application::ports::{MetricsError, MetricsSink};
use trackprobe_domain::MetricRecord;

/// Emits records as `info` events instead of persisting them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetricsSink;

impl MetricsSink for TracingMetricsSink {
    fn record(&self, record: &MetricRecord) -> Result<(), MetricsError> {
        tracing::info!(
            endpoint = %record.endpoint,
            method = %record.method,
            url = %record.url,
            status = %record.status_tag(),
            latency_ms = record.latency.as_millis(),
            "response_time"
        );
        Ok(())
    }
}
