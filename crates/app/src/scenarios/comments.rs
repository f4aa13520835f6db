//! Comment scenarios.

use trackprobe_application::ApplicationResult;
use trackprobe_application::ports::RequestExecutor;
use trackprobe_application::use_cases::{FakeData, ResourceGuard};
use trackprobe_domain::CommentPayload;

use super::issues::issue_fixture;
use super::{Cleanup, Marker, Scenario, Suite, scenario};
use crate::harness::{Harness, SuiteExecutor};

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario("test_add_comment", Suite::Comments, Marker::Acceptance, add_comment),
        scenario("test_get_comment", Suite::Comments, Marker::Acceptance, get_comment),
        scenario("test_update_comment", Suite::Comments, Marker::Acceptance, update_comment),
        scenario("test_delete_comment", Suite::Comments, Marker::Acceptance, delete_comment),
        scenario(
            "test_add_comment_without_body",
            Suite::Comments,
            Marker::Functional,
            add_comment_without_body,
        ),
    ]
}

fn comment_fixture<'e, 'h>(
    harness: &Harness,
    executor: &'e SuiteExecutor<'h>,
    issue: &str,
) -> ApplicationResult<ResourceGuard<'e, SuiteExecutor<'h>>> {
    let api = harness.api();
    ResourceGuard::acquire(
        executor,
        "comment",
        &api.add_comment(issue, Some(&CommentPayload::paragraph(FakeData::sentence())))?,
        |id| api.delete_comment(issue, id),
    )
}

fn add_comment(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let api = harness.api();
    let issue = &harness.fixtures().comment_issue;
    let payload = CommentPayload::paragraph(FakeData::sentence());
    let result = executor.execute(&api.add_comment(issue, Some(&payload))?);
    cleanup.register_created("comment", &result, |id| api.delete_comment(issue, id))?;
    tracing::debug!("Response: {:#}", result.body);
    harness.validator().validate(&result, "add_comment")
}

fn get_comment(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let issue = issue_fixture(harness, executor)?;
    let comment = comment_fixture(harness, executor, issue.id())?;
    let result = executor.execute(&harness.api().get_comment(issue.id(), comment.id())?);
    tracing::debug!("Response: {:#}", result.body);
    harness.validator().validate(&result, "get_comment")
}

fn update_comment(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let issue = issue_fixture(harness, executor)?;
    let comment = comment_fixture(harness, executor, issue.id())?;
    let payload = CommentPayload::paragraph("Update comment test");
    let result = executor.execute(
        &harness
            .api()
            .update_comment(issue.id(), comment.id(), &payload)?,
    );
    harness.validator().validate(&result, "update_comment")
}

fn delete_comment(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let issue = issue_fixture(harness, executor)?;
    let result = comment_fixture(harness, executor, issue.id())?.release();
    harness.validator().validate(&result, "delete_comment")
}

fn add_comment_without_body(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let issue = &harness.fixtures().comment_issue;
    let result = executor.execute(&harness.api().add_comment::<CommentPayload>(issue, None)?);
    tracing::debug!("Response: {:#}", result.body);
    harness.validator().validate(&result, "add_comment_without_body")
}
