//! Latency recording around a request executor.

use std::time::Instant;

use trackprobe_domain::{ApiRequest, MetricRecord, RequestResult};

use crate::ports::{Clock, MetricsSink, RequestExecutor};

/// Executor decorator that emits one [`MetricRecord`] per call.
///
/// The wrapped result is returned unchanged. A failing sink is logged and
/// otherwise ignored.
pub struct MeteredExecutor<E, S, C> {
    inner: E,
    sink: S,
    clock: C,
    endpoint: String,
}

impl<E, S, C> MeteredExecutor<E, S, C>
where
    E: RequestExecutor,
    S: MetricsSink,
    C: Clock,
{
    /// Wraps `inner`, tagging every record with `endpoint`.
    pub fn new(inner: E, sink: S, clock: C, endpoint: impl Into<String>) -> Self {
        Self {
            inner,
            sink,
            clock,
            endpoint: endpoint.into(),
        }
    }
}

impl<E, S, C> RequestExecutor for MeteredExecutor<E, S, C>
where
    E: RequestExecutor,
    S: MetricsSink,
    C: Clock,
{
    fn execute(&self, request: &ApiRequest) -> RequestResult {
        let started = Instant::now();
        let result = self.inner.execute(request);
        let record = MetricRecord {
            url: request.url.clone(),
            method: request.method,
            status: result.status_code,
            endpoint: self.endpoint.clone(),
            latency: started.elapsed(),
            timestamp: self.clock.now(),
        };
        tracing::debug!(
            "Data stored in DB: {}, {}, {}, {}",
            record.endpoint,
            record.url,
            record.method,
            record.status_tag()
        );
        if let Err(error) = self.sink.record(&record) {
            tracing::warn!(%error, url = %record.url, "failed to store latency metric");
        }
        result
    }
}
