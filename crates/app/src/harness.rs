//! Shared state for a harness run.

use std::time::Duration;

use anyhow::Context;
use trackprobe_application::use_cases::{MeteredExecutor, TrackerApi};
use trackprobe_domain::{ProbeSettings, TrackerFixtures};
use trackprobe_infrastructure::{
    ConfiguredSink, FileExpectationStore, ReqwestExecutor, ResponseValidator, SystemClock,
};

/// Executor used by one suite: the shared transport wrapped with latency
/// recording tagged by the suite's endpoint.
pub type SuiteExecutor<'h> = MeteredExecutor<&'h ReqwestExecutor, ConfiguredSink, SystemClock>;

/// Everything scenarios need, built once from settings.
pub struct Harness {
    settings: ProbeSettings,
    api: TrackerApi,
    executor: ReqwestExecutor,
    sink: ConfiguredSink,
    validator: ResponseValidator<FileExpectationStore>,
}

impl Harness {
    /// Builds the harness.
    ///
    /// # Errors
    /// Returns an error if the base URL is unusable or the HTTP client or
    /// metrics sink cannot be created.
    pub fn new(settings: ProbeSettings) -> anyhow::Result<Self> {
        let api = TrackerApi::new(&settings).context("invalid tracker base URL")?;
        let executor = match settings.timeout_secs {
            Some(secs) => ReqwestExecutor::with_timeout(Duration::from_secs(secs)),
            None => ReqwestExecutor::new(),
        }
        .context("failed to create HTTP client")?;
        let sink = ConfiguredSink::from_settings(settings.influx.as_ref())
            .context("failed to create metrics sink")?;
        let validator = ResponseValidator::new(FileExpectationStore::new(&settings.expectations_dir))
            .with_header_mode(settings.header_check);

        tracing::debug!(?settings, "harness ready");
        Ok(Self {
            settings,
            api,
            executor,
            sink,
            validator,
        })
    }

    /// Executor recording metrics under `endpoint`.
    #[must_use]
    pub fn metered(&self, endpoint: &str) -> SuiteExecutor<'_> {
        MeteredExecutor::new(&self.executor, self.sink.clone(), SystemClock, endpoint)
    }

    /// Request builder for the tracker API.
    #[must_use]
    pub const fn api(&self) -> &TrackerApi {
        &self.api
    }

    /// Validator bound to the configured expectations directory.
    #[must_use]
    pub const fn validator(&self) -> &ResponseValidator<FileExpectationStore> {
        &self.validator
    }

    /// Pre-existing tracker objects the scenarios build on.
    #[must_use]
    pub const fn fixtures(&self) -> &TrackerFixtures {
        &self.settings.fixtures
    }

    /// Resolved settings.
    #[must_use]
    pub const fn settings(&self) -> &ProbeSettings {
        &self.settings
    }
}
