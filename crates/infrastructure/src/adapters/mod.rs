//! Transport and time adapters.

mod reqwest_client;
mod system_clock;

pub use reqwest_client::{ExecutorError, ReqwestExecutor};
pub use system_clock::SystemClock;
