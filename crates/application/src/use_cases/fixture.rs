//! Scoped test data.
//!
//! A [`ResourceGuard`] creates a resource and deletes it when dropped, so the
//! delete call runs on every exit path of a scenario, including early
//! returns and panics. A [`CleanupScope`] collects deletes for resources a
//! scenario created itself and runs them when the scope ends.

use trackprobe_domain::{ApiRequest, RequestResult};

use crate::ports::RequestExecutor;
use crate::{ApplicationError, ApplicationResult};

/// A created resource whose deletion is tied to the guard's lifetime.
pub struct ResourceGuard<'a, E: RequestExecutor> {
    executor: &'a E,
    kind: &'static str,
    id: String,
    created: RequestResult,
    delete: ApiRequest,
    armed: bool,
}

impl<'a, E: RequestExecutor> ResourceGuard<'a, E> {
    /// Runs `create` and guards the resource it returns.
    ///
    /// `delete` receives the id found in the response body and builds the
    /// request that removes the resource.
    ///
    /// # Errors
    /// Returns `ApplicationError::Fixture` if the response has no `id`, and
    /// propagates errors from `delete`.
    pub fn acquire<F>(
        executor: &'a E,
        kind: &'static str,
        create: &ApiRequest,
        delete: F,
    ) -> ApplicationResult<Self>
    where
        F: FnOnce(&str) -> ApplicationResult<ApiRequest>,
    {
        tracing::info!("Create {kind} fixture");
        let created = executor.execute(create);
        let Some(id) = created.body_id() else {
            return Err(ApplicationError::Fixture(format!(
                "{kind} creation returned status {} without an id: {}",
                created.status_display(),
                created.body
            )));
        };
        let delete = delete(&id)?;
        tracing::debug!(kind, id = %id, "fixture acquired");
        Ok(Self {
            executor,
            kind,
            id,
            created,
            delete,
            armed: true,
        })
    }

    /// Id of the guarded resource.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Result of the create call.
    #[must_use]
    pub const fn created(&self) -> &RequestResult {
        &self.created
    }

    /// Deletes the resource now and returns the delete result.
    ///
    /// The delete is not repeated when the guard drops.
    pub fn release(mut self) -> RequestResult {
        self.armed = false;
        run_delete(self.executor, self.kind, &self.delete)
    }
}

impl<E: RequestExecutor> Drop for ResourceGuard<'_, E> {
    fn drop(&mut self) {
        if self.armed {
            run_delete(self.executor, self.kind, &self.delete);
        }
    }
}

/// Deletes queued during a scenario, executed in order when dropped.
pub struct CleanupScope<'a, E: RequestExecutor> {
    executor: &'a E,
    name: String,
    pending: Vec<(&'static str, ApiRequest)>,
}

impl<'a, E: RequestExecutor> CleanupScope<'a, E> {
    /// Creates an empty scope.
    #[must_use]
    pub fn new(executor: &'a E, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
            pending: Vec::new(),
        }
    }

    /// Queues a delete request.
    pub fn register(&mut self, kind: &'static str, request: ApiRequest) {
        self.pending.push((kind, request));
    }

    /// Queues the delete for the resource a create call returned, if any.
    ///
    /// Returns the id when the body carried one.
    ///
    /// # Errors
    /// Propagates errors from `delete`.
    pub fn register_created<F>(
        &mut self,
        kind: &'static str,
        created: &RequestResult,
        delete: F,
    ) -> ApplicationResult<Option<String>>
    where
        F: FnOnce(&str) -> ApplicationResult<ApiRequest>,
    {
        let Some(id) = created.body_id() else {
            return Ok(None);
        };
        self.register(kind, delete(&id)?);
        Ok(Some(id))
    }

    /// Number of deletes still queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E: RequestExecutor> Drop for CleanupScope<'_, E> {
    fn drop(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        tracing::info!("{} teardown", self.name);
        for (kind, request) in self.pending.drain(..) {
            run_delete(self.executor, kind, &request);
        }
    }
}

fn run_delete<E: RequestExecutor>(executor: &E, kind: &str, request: &ApiRequest) -> RequestResult {
    tracing::info!("Delete {kind} fixture");
    let result = executor.execute(request);
    tracing::debug!("Status Code: {}", result.status_display());
    if result.status_code == Some(204) {
        tracing::debug!("{kind} deleted");
    } else {
        tracing::warn!(
            url = %request.url,
            status = %result.status_display(),
            "{kind} cleanup did not return 204"
        );
    }
    result
}
