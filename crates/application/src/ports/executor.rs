//! Request executor port

use trackprobe_domain::{ApiRequest, RequestResult};

/// Port for issuing one HTTP call.
///
/// Implementations must never fail: every transport problem is folded into
/// the returned [`RequestResult`]. The only fallible step, choosing an
/// unsupported method, happens before a request can be built.
pub trait RequestExecutor {
    /// Performs exactly one call and normalises its outcome.
    fn execute(&self, request: &ApiRequest) -> RequestResult;
}

impl<E: RequestExecutor + ?Sized> RequestExecutor for &E {
    fn execute(&self, request: &ApiRequest) -> RequestResult {
        (**self).execute(request)
    }
}
