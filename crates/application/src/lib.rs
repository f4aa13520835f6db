//! Trackprobe Application - Use cases and ports
//!
//! This crate contains the harness logic that sits between test scenarios
//! and the transport: endpoint building, scoped fixtures and metrics
//! decoration. It defines ports (traits) that infrastructure adapters
//! implement.

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
