//! Project scenarios.

use trackprobe_application::ApplicationResult;
use trackprobe_application::ports::RequestExecutor;
use trackprobe_application::use_cases::{FakeData, ResourceGuard};
use trackprobe_domain::ProjectPayload;

use super::{Cleanup, Marker, Scenario, Suite, scenario};
use crate::harness::{Harness, SuiteExecutor};

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        scenario("test_create_project", Suite::Projects, Marker::Acceptance, create_project),
        scenario("test_get_project", Suite::Projects, Marker::Acceptance, get_project),
        scenario("test_update_project", Suite::Projects, Marker::Acceptance, update_project),
        scenario("test_delete_project", Suite::Projects, Marker::Acceptance, delete_project),
        scenario(
            "test_create_project_without_body",
            Suite::Projects,
            Marker::Functional,
            create_project_without_body,
        ),
    ]
}

fn new_project(harness: &Harness) -> ProjectPayload {
    ProjectPayload::create(
        FakeData::project_key(),
        FakeData::project_name(),
        harness.api().account_id(),
    )
}

/// Creates a throwaway project that is deleted when the guard drops.
pub(super) fn project_fixture<'e, 'h>(
    harness: &Harness,
    executor: &'e SuiteExecutor<'h>,
) -> ApplicationResult<ResourceGuard<'e, SuiteExecutor<'h>>> {
    let api = harness.api();
    ResourceGuard::acquire(
        executor,
        "project",
        &api.create_project(Some(&new_project(harness)))?,
        |id| api.delete_project(id),
    )
}

fn create_project(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let api = harness.api();
    let result = executor.execute(&api.create_project(Some(&new_project(harness)))?);
    cleanup.register_created("project", &result, |id| api.delete_project(id))?;
    tracing::debug!("Response: {:#}", result.body);
    harness.validator().validate(&result, "create_project")
}

fn get_project(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let project = project_fixture(harness, executor)?;
    let result = executor.execute(&harness.api().get_project(project.id())?);
    tracing::debug!("Response: {:#}", result.body);
    harness.validator().validate(&result, "get_project")
}

fn update_project(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let project = project_fixture(harness, executor)?;
    let payload = ProjectPayload::rename(
        format!("Project {} (update test)", project.id()),
        "Update project test API",
    );
    let result = executor.execute(&harness.api().update_project(project.id(), &payload)?);
    harness.validator().validate(&result, "update_project")
}

fn delete_project(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let result = project_fixture(harness, executor)?.release();
    harness.validator().validate(&result, "delete_project")
}

fn create_project_without_body(
    harness: &Harness,
    executor: &SuiteExecutor<'_>,
    _cleanup: &mut Cleanup<'_, '_>,
) -> ApplicationResult<()> {
    let result = executor.execute(&harness.api().create_project::<ProjectPayload>(None)?);
    tracing::debug!("Response: {:#}", result.body);
    harness.validator().validate(&result, "create_project_without_body")
}
