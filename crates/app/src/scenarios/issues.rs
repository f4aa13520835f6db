//! Issue scenarios.

use trackprobe_application::ApplicationResult;
use trackprobe_application::ports::RequestExecutor;
use trackprobe_application::use_cases::{FakeData, ResourceGuard};
use trackprobe_domain::IssuePayload;

use super::projects::project_fixture;
use super::{Cleanup, Marker, Scenario, Suite, scenario};
use crate::harness::{Harness, SuiteExecutor};

/// Key of an issue that does not exist.
const MISSING_ISSUE_ID: &str = "00000";

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario("test_create_issue", Suite::Issues, Marker::Acceptance, create_issue),
        scenario("test_get_issue", Suite::Issues, Marker::Acceptance, get_issue),
        scenario("test_update_issue", Suite::Issues, Marker::Acceptance, update_issue),
        scenario("test_delete_issue", Suite::Issues, Marker::Acceptance, delete_issue),
        scenario(
            "test_create_issue_without_body",
            Suite::Issues,
            Marker::Functional,
            create_issue_without_body,
        ),
        scenario(
            "test_create_issue_using_different_summary_data[123456789]",
            Suite::Issues,
            Marker::Functional,
            create_issue_with_numeric_summary,
        ),
        scenario(
            "test_create_issue_using_different_summary_data[∀∁∂∃∄∅∆∇∈∉]",
            Suite::Issues,
            Marker::Functional,
            create_issue_with_symbol_summary,
        ),
        scenario(
            "test_create_issue_using_different_summary_data[<script>alert('test');</script>]",
            Suite::Issues,
            Marker::Functional,
            create_issue_with_script_summary,
        ),
        scenario(
            "test_get_issue_with_incorrect_issue_id",
            Suite::Issues,
            Marker::Functional,
            get_issue_with_incorrect_id,
        ),
        scenario(
            "test_create_issue_without_auth",
            Suite::Issues,
            Marker::Functional,
            create_issue_without_auth,
        ),
        scenario(
            "test_create_issue_with_project_id",
            Suite::Issues,
            Marker::Functional,
            create_issue_with_project_id,
        ),
    ]
}

fn new_issue(harness: &Harness, summary: impl Into<String>) -> IssuePayload {
    let fixtures = harness.fixtures();
    IssuePayload::create(&fixtures.project_id, &fixtures.issue_type_id, summary)
}

/// Creates an issue that is deleted when the guard drops.
pub(super) fn issue_fixture<'e, 'h>(
    harness: &Harness,
    executor: &'e SuiteExecutor<'h>,
) -> ApplicationResult<ResourceGuard<'e, SuiteExecutor<'h>>> {
    let api = harness.api();
    ResourceGuard::acquire(
        executor,
        "issue",
        &api.create_issue(Some(&new_issue(harness, "Epic issue from fixture")))?,
        |id| api.delete_issue(id),
    )
}

fn create_issue(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    create_with_summary(harness, executor, cleanup, &format!("Task {}", FakeData::company()))
}

fn get_issue(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let issue = issue_fixture(harness, executor)?;
    let result = executor.execute(&harness.api().get_issue(issue.id())?);
    tracing::debug!("Response: {:#}", result.body);
    harness.validator().validate(&result, "get_issue")
}

fn update_issue(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let issue = issue_fixture(harness, executor)?;
    let payload = IssuePayload::summary_update("Updated Task issue");
    let result = executor.execute(&harness.api().update_issue(issue.id(), &payload)?);
    harness.validator().validate(&result, "update_issue")
}

fn delete_issue(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let result = issue_fixture(harness, executor)?.release();
    harness.validator().validate(&result, "delete_issue")
}

fn create_issue_without_body(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let result = executor.execute(&harness.api().create_issue::<IssuePayload>(None)?);
    tracing::debug!("Response: {:#}", result.body);
    harness.validator().validate(&result, "create_issue_without_body")
}

fn create_issue_with_numeric_summary(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    create_with_summary(harness, executor, cleanup, "123456789")
}

fn create_issue_with_symbol_summary(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    create_with_summary(harness, executor, cleanup, "∀∁∂∃∄∅∆∇∈∉")
}

fn create_issue_with_script_summary(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    create_with_summary(harness, executor, cleanup, "<script>alert('test');</script>")
}

fn create_with_summary(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    cleanup: &mut Cleanup<'_, '_>,
    summary: &str,
) -> ApplicationResult<()> {
    let api = harness.api();
    let result = executor.execute(&api.create_issue(Some(&new_issue(harness, summary)))?);
    cleanup.register_created("issue", &result, |id| api.delete_issue(id))?;
    harness.validator().validate(&result, "create_issue")
}

fn get_issue_with_incorrect_id(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let result = executor.execute(&harness.api().get_issue(MISSING_ISSUE_ID)?);
    harness.validator().validate(&result, "get_issue_with_incorrect_id")
}

fn create_issue_without_auth(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let api = harness.api();
    let payload = new_issue(harness, format!("Task {}", FakeData::company()));
    let result = executor.execute(&api.create_issue(Some(&payload))?.without_auth());
    // An anonymous create that unexpectedly succeeds still gets removed.
    cleanup.register_created("issue", &result, |id| api.delete_issue(id))?;
    harness.validator().validate(&result, "create_issue_without_auth")
}

fn create_issue_with_project_id(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let project = project_fixture(harness, executor)?;
    let payload = IssuePayload::create(
        project.id(),
        &harness.fixtures().issue_type_id,
        format!("Issue {}", FakeData::company()),
    );
    // Issues go away with their project.
    let result = executor.execute(&harness.api().create_issue(Some(&payload))?);
    harness.validator().validate(&result, "create_issue")
}
