//! Endpoint and request building for the tracker's REST API.

use serde::Serialize;
use trackprobe_domain::{ApiRequest, BasicAuth, HttpMethod, ProbeSettings};
use url::Url;

use crate::{ApplicationError, ApplicationResult};

const APPLICATION_JSON: &str = "application/json";

/// Builds authenticated requests for projects, issues and comments.
///
/// Reads send `Accept` only; writes also send `Content-Type`. Deletes carry
/// credentials but no headers.
#[derive(Debug, Clone)]
pub struct TrackerApi {
    base: Url,
    auth: BasicAuth,
    account_id: String,
}

impl TrackerApi {
    /// Creates the builder from resolved settings.
    ///
    /// # Errors
    /// Returns `ApplicationError::Endpoint` if the base URL is not absolute.
    pub fn new(settings: &ProbeSettings) -> ApplicationResult<Self> {
        let mut base = settings.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .map_err(|e| ApplicationError::Endpoint(format!("{e}: {}", settings.base_url)))?;
        Ok(Self {
            base,
            auth: settings.auth(),
            account_id: settings.account_id.clone(),
        })
    }

    /// Account id used as project lead.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Resolves a path relative to the API root.
    ///
    /// # Errors
    /// Returns `ApplicationError::Endpoint` if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> ApplicationResult<String> {
        self.base
            .join(path)
            .map(String::from)
            .map_err(|e| ApplicationError::Endpoint(format!("{e}: {path}")))
    }

    /// Authenticated read request.
    ///
    /// # Errors
    /// Returns an error if the endpoint cannot be built.
    pub fn read(&self, path: &str) -> ApplicationResult<ApiRequest> {
        Ok(ApiRequest::get(self.endpoint(path)?)
            .with_auth(self.auth.clone())
            .with_header("Accept", APPLICATION_JSON))
    }

    /// Authenticated write request, with a body when one is given.
    ///
    /// # Errors
    /// Returns an error if the endpoint cannot be built or the payload
    /// cannot be serialized.
    pub fn write<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&T>,
    ) -> ApplicationResult<ApiRequest> {
        let mut request = ApiRequest::new(method, self.endpoint(path)?)
            .with_auth(self.auth.clone())
            .with_header("Accept", APPLICATION_JSON)
            .with_header("Content-Type", APPLICATION_JSON);
        if let Some(payload) = payload {
            request = request.with_body(serde_json::to_value(payload)?);
        }
        Ok(request)
    }

    /// Authenticated delete request.
    ///
    /// # Errors
    /// Returns an error if the endpoint cannot be built.
    pub fn remove(&self, path: &str) -> ApplicationResult<ApiRequest> {
        Ok(ApiRequest::delete(self.endpoint(path)?).with_auth(self.auth.clone()))
    }

    /// `POST project`.
    ///
    /// # Errors
    /// See [`Self::write`].
    pub fn create_project<T: Serialize>(&self, payload: Option<&T>) -> ApplicationResult<ApiRequest> {
        self.write(HttpMethod::Post, "project", payload)
    }

    /// `GET project/{id}`.
    ///
    /// # Errors
    /// See [`Self::read`].
    pub fn get_project(&self, id: &str) -> ApplicationResult<ApiRequest> {
        self.read(&format!("project/{id}"))
    }

    /// `PUT project/{id}`.
    ///
    /// # Errors
    /// See [`Self::write`].
    pub fn update_project<T: Serialize>(&self, id: &str, payload: &T) -> ApplicationResult<ApiRequest> {
        self.write(HttpMethod::Put, &format!("project/{id}"), Some(payload))
    }

    /// `DELETE project/{id}`.
    ///
    /// # Errors
    /// See [`Self::remove`].
    pub fn delete_project(&self, id: &str) -> ApplicationResult<ApiRequest> {
        self.remove(&format!("project/{id}"))
    }

    /// `POST issue`.
    ///
    /// # Errors
    /// See [`Self::write`].
    pub fn create_issue<T: Serialize>(&self, payload: Option<&T>) -> ApplicationResult<ApiRequest> {
        self.write(HttpMethod::Post, "issue", payload)
    }

    /// `GET issue/{id}`.
    ///
    /// # Errors
    /// See [`Self::read`].
    pub fn get_issue(&self, id: &str) -> ApplicationResult<ApiRequest> {
        self.read(&format!("issue/{id}"))
    }

    /// `PUT issue/{id}?returnIssue=true`.
    ///
    /// # Errors
    /// See [`Self::write`].
    pub fn update_issue<T: Serialize>(&self, id: &str, payload: &T) -> ApplicationResult<ApiRequest> {
        Ok(self
            .write(HttpMethod::Put, &format!("issue/{id}"), Some(payload))?
            .with_param("returnIssue", "true"))
    }

    /// `DELETE issue/{id}`.
    ///
    /// # Errors
    /// See [`Self::remove`].
    pub fn delete_issue(&self, id: &str) -> ApplicationResult<ApiRequest> {
        self.remove(&format!("issue/{id}"))
    }

    /// `POST issue/{issue}/comment`.
    ///
    /// # Errors
    /// See [`Self::write`].
    pub fn add_comment<T: Serialize>(
        &self,
        issue: &str,
        payload: Option<&T>,
    ) -> ApplicationResult<ApiRequest> {
        self.write(HttpMethod::Post, &format!("issue/{issue}/comment"), payload)
    }

    /// `GET issue/{issue}/comment/{comment}`.
    ///
    /// # Errors
    /// See [`Self::read`].
    pub fn get_comment(&self, issue: &str, comment: &str) -> ApplicationResult<ApiRequest> {
        self.read(&format!("issue/{issue}/comment/{comment}"))
    }

    /// `PUT issue/{issue}/comment/{comment}`.
    ///
    /// # Errors
    /// See [`Self::write`].
    pub fn update_comment<T: Serialize>(
        &self,
        issue: &str,
        comment: &str,
        payload: &T,
    ) -> ApplicationResult<ApiRequest> {
        self.write(
            HttpMethod::Put,
            &format!("issue/{issue}/comment/{comment}"),
            Some(payload),
        )
    }

    /// `DELETE issue/{issue}/comment/{comment}`.
    ///
    /// # Errors
    /// See [`Self::remove`].
    pub fn delete_comment(&self, issue: &str, comment: &str) -> ApplicationResult<ApiRequest> {
        self.remove(&format!("issue/{issue}/comment/{comment}"))
    }
}
