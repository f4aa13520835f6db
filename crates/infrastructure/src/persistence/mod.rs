//! Persistence adapters.

mod expectation_repository;

pub use expectation_repository::FileExpectationStore;
