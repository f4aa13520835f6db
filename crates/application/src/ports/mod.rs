//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the harness core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod executor;
mod expectation_store;
mod metrics_sink;

pub use clock::Clock;
pub use executor::RequestExecutor;
pub use expectation_store::{ExpectationError, ExpectationStore};
pub use metrics_sink::{MetricsError, MetricsSink};
