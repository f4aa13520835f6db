//! Trackprobe - Acceptance harness for an issue tracker REST API
//!
//! Wires the settings, executor, metrics sink and validator together and
//! runs the project, issue and comment scenarios against a live tracker.

pub mod harness;
pub mod runner;
pub mod scenarios;

pub use harness::{Harness, SuiteExecutor};
pub use runner::{Filter, RunReport, ScenarioOutcome};
pub use scenarios::{Marker, Scenario, Suite, catalogue};
