//! Trackprobe Domain - Core harness types
//!
//! This crate defines the data model of the acceptance harness: requests,
//! normalised results, stored expectations and metric records.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod expectation;
pub mod metrics;
pub mod request;
pub mod response;
pub mod settings;
pub mod testing;
pub mod tracker;

pub use error::{DomainError, DomainResult};
pub use expectation::{ExpectationDocument, HeaderCheckMode};
pub use metrics::{MetricRecord, RESPONSE_TIME_MEASUREMENT};
pub use request::{ApiRequest, BasicAuth, HttpMethod};
pub use response::{Outcome, RequestResult};
pub use settings::{InfluxSettings, ProbeSettings, TrackerFixtures};
pub use testing::{ValidationCheck, ValidationFailure};
pub use tracker::{CommentPayload, IssuePayload, ProjectPayload};
