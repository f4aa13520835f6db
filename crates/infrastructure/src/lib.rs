//! Trackprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod metrics;
pub mod persistence;
pub mod settings;
pub mod testing;

pub use adapters::{ExecutorError, ReqwestExecutor, SystemClock};
pub use metrics::{ConfiguredSink, InfluxLineSink, TracingMetricsSink, to_line_protocol};
pub use persistence::FileExpectationStore;
pub use settings::{SettingsError, SettingsLoader};
pub use testing::ResponseValidator;
