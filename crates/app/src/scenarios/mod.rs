//! Scenario catalogue.
//!
//! A scenario performs one tracker call and validates it against a named
//! expectation. Scenarios belong to a suite; each suite runs with its own
//! metered executor and a cleanup scope that removes whatever its scenarios
//! created once the suite ends.

mod comments;
mod issues;
mod projects;

use std::fmt;

use clap::ValueEnum;
use trackprobe_application::ApplicationResult;
use trackprobe_application::use_cases::CleanupScope;

use crate::harness::{Harness, SuiteExecutor};

/// Suite-level cleanup list.
pub type Cleanup<'a, 'h> = CleanupScope<'a, SuiteExecutor<'h>>;

/// Scenario body.
pub type ScenarioFn =
    fn(&Harness, &SuiteExecutor<'_>, &mut Cleanup<'_, '_>) -> ApplicationResult<()>;

/// Group of scenarios sharing an endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Suite {
    /// `project` endpoints.
    Projects,
    /// `issue` endpoints.
    Issues,
    /// `issue/{id}/comment` endpoints.
    Comments,
}

impl Suite {
    /// All suites in run order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Projects, Self::Issues, Self::Comments]
    }

    /// Endpoint tag attached to latency records.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Issues => "issues",
            Self::Comments => "comments",
        }
    }

    /// Label logged when the suite's cleanup runs.
    #[must_use]
    pub const fn teardown_label(self) -> &'static str {
        match self {
            Self::Projects => "Test Project",
            Self::Issues => "Test Issue",
            Self::Comments => "Test Comments",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Scenario category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Marker {
    /// Happy-path CRUD checks.
    Acceptance,
    /// Edge cases and error responses.
    Functional,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acceptance => f.write_str("acceptance"),
            Self::Functional => f.write_str("functional"),
        }
    }
}

/// One named check against the tracker.
#[derive(Clone, Copy)]
pub struct Scenario {
    /// Name used in logs and reports.
    pub name: &'static str,
    /// Owning suite.
    pub suite: Suite,
    /// Category.
    pub marker: Marker,
    /// Body.
    pub run: ScenarioFn,
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("suite", &self.suite)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

/// Every scenario, grouped by suite in run order.
#[must_use]
pub fn catalogue() -> Vec<Scenario> {
    let mut all = projects::scenarios();
    all.extend(issues::scenarios());
    all.extend(comments::scenarios());
    all
}

const fn scenario(name: &'static str, suite: Suite, marker: Marker, run: ScenarioFn) -> Scenario {
    Scenario {
        name,
        suite,
        marker,
        run,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_names_are_unique() {
        let all = catalogue();
        let names: HashSet<_> = all.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_catalogue_is_grouped_by_suite() {
        let suites: Vec<Suite> = catalogue().iter().map(|s| s.suite).collect();
        let mut grouped = suites.clone();
        grouped.dedup();
        assert_eq!(grouped, Suite::all().to_vec());
    }

    #[test]
    fn test_every_suite_has_both_markers() {
        let all = catalogue();
        for suite in Suite::all() {
            for marker in [Marker::Acceptance, Marker::Functional] {
                assert!(
                    all.iter().any(|s| s.suite == *suite && s.marker == marker),
                    "{suite} has no {marker} scenario"
                );
            }
        }
    }
}
