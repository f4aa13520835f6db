//! Metrics sinks.

mod influx;
mod logging;

pub use influx::{InfluxLineSink, to_line_protocol};
pub use logging::TracingMetricsSink;

use trackprobe_application::ports::{MetricsError, MetricsSink};
use trackprobe_domain::{InfluxSettings, MetricRecord};

/// Sink chosen from settings: InfluxDB when configured, logging otherwise.
#[derive(Debug, Clone)]
pub enum ConfiguredSink {
    /// Persist to InfluxDB.
    Influx(InfluxLineSink),
    /// Log only.
    Log(TracingMetricsSink),
}

impl ConfiguredSink {
    /// Builds the sink for optional Influx settings.
    ///
    /// # Errors
    /// Returns an error if the Influx sink cannot be created.
    pub fn from_settings(settings: Option<&InfluxSettings>) -> Result<Self, MetricsError> {
        match settings {
            Some(influx) => Ok(Self::Influx(InfluxLineSink::new(influx)?)),
            None => Ok(Self::Log(TracingMetricsSink)),
        }
    }
}

impl MetricsSink for ConfiguredSink {
    fn record(&self, record: &MetricRecord) -> Result<(), MetricsError> {
        match self {
            Self::Influx(sink) => sink.record(record),
            Self::Log(sink) => sink.record(record),
        }
    }
}
