//! Sequential scenario runner.

use std::fmt;

use trackprobe_application::ApplicationError;
use trackprobe_application::use_cases::CleanupScope;

use crate::harness::Harness;
use crate::scenarios::{Marker, Scenario, Suite};

/// Selects scenarios by suite and marker. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Suites to run.
    pub suites: Vec<Suite>,
    /// Markers to run.
    pub markers: Vec<Marker>,
}

impl Filter {
    /// Returns true when `scenario` is selected.
    #[must_use]
    pub fn matches(&self, scenario: &Scenario) -> bool {
        (self.suites.is_empty() || self.suites.contains(&scenario.suite))
            && (self.markers.is_empty() || self.markers.contains(&scenario.marker))
    }

    /// Selected scenarios in catalogue order.
    #[must_use]
    pub fn select(&self, scenarios: &[Scenario]) -> Vec<Scenario> {
        scenarios.iter().filter(|s| self.matches(s)).copied().collect()
    }
}

/// Result of one scenario.
#[derive(Debug)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: &'static str,
    /// Owning suite.
    pub suite: Suite,
    /// `None` when the scenario passed.
    pub error: Option<ApplicationError>,
}

impl ScenarioOutcome {
    /// Returns true when the scenario passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "PASS {}::{}", self.suite, self.name),
            Some(error) if error.is_validation_failure() => {
                write!(f, "FAIL {}::{}: {error}", self.suite, self.name)
            }
            Some(error) => write!(f, "ERROR {}::{}: {error}", self.suite, self.name),
        }
    }
}

/// Outcomes of a run, in execution order.
#[derive(Debug, Default)]
pub struct RunReport {
    /// One entry per executed scenario.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    /// Number of passed scenarios.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of failed scenarios, assertion failures and errors alike.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Returns true when every scenario passed.
    #[must_use]
    pub fn success(&self) -> bool {
        self.failed() == 0
    }
}

/// Runs `scenarios` suite by suite.
///
/// Each suite gets its own metered executor and cleanup scope; the scope
/// drops, deleting everything its scenarios registered, before the next
/// suite starts. A failing scenario does not stop the run.
pub fn run(harness: &Harness, scenarios: &[Scenario]) -> RunReport {
    let mut report = RunReport::default();
    for suite in Suite::all() {
        let selected: Vec<&Scenario> = scenarios.iter().filter(|s| s.suite == *suite).collect();
        if selected.is_empty() {
            continue;
        }

        let executor = harness.metered(suite.endpoint());
        let mut cleanup = CleanupScope::new(&executor, suite.teardown_label());
        for scenario in selected {
            tracing::info!("Start test '{}'", scenario.name);
            let error = (scenario.run)(harness, &executor, &mut cleanup).err();
            tracing::info!("End test '{}'", scenario.name);

            let outcome = ScenarioOutcome {
                name: scenario.name,
                suite: *suite,
                error,
            };
            if let Some(error) = &outcome.error {
                tracing::error!("{} failed: {error}", scenario.name);
            }
            report.outcomes.push(outcome);
        }
    }
    report
}
