//! Application use cases (harness logic orchestration).

mod fake_data;
mod fixture;
mod metered;
mod tracker_api;

pub use fake_data::FakeData;
pub use fixture::{CleanupScope, ResourceGuard};
pub use metered::MeteredExecutor;
pub use tracker_api::TrackerApi;
