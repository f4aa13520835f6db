//! Stateful fake tracker served by axum on a background runtime.
#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, mpsc};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

const SELF_ROOT: &str = "http://tracker.test/rest/api/3";

/// Key of the issue that exists before any scenario runs.
pub const SEEDED_ISSUE_KEY: &str = "EXU-1";
/// Id of the seeded issue.
pub const SEEDED_ISSUE_ID: &str = "10001";

#[derive(Debug, Clone)]
pub struct Project {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Issue {
    pub key: String,
    pub project: String,
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub issue: String,
    pub body: Value,
}

/// In-memory tracker state.
#[derive(Debug)]
pub struct Tracker {
    next_id: u64,
    pub projects: BTreeMap<String, Project>,
    pub issues: BTreeMap<String, Issue>,
    pub comments: BTreeMap<String, Comment>,
    pub requests: usize,
    /// Paths of deletes that targeted something already gone.
    pub stale_deletes: Vec<String>,
}

impl Default for Tracker {
    fn default() -> Self {
        let mut issues = BTreeMap::new();
        issues.insert(
            SEEDED_ISSUE_ID.to_string(),
            Issue {
                key: SEEDED_ISSUE_KEY.to_string(),
                project: "10033".to_string(),
                summary: "Seeded issue".to_string(),
            },
        );
        Self {
            next_id: 10_100,
            projects: BTreeMap::new(),
            issues,
            comments: BTreeMap::new(),
            requests: 0,
            stale_deletes: Vec::new(),
        }
    }
}

impl Tracker {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn resolve_issue(&self, id_or_key: &str) -> Option<String> {
        if self.issues.contains_key(id_or_key) {
            return Some(id_or_key.to_string());
        }
        self.issues
            .iter()
            .find(|(_, issue)| issue.key == id_or_key)
            .map(|(id, _)| id.clone())
    }

    fn remove_issue(&mut self, id: &str) {
        self.issues.remove(id);
        self.comments.retain(|_, comment| comment.issue != id);
    }
}

pub type Shared = Arc<Mutex<Tracker>>;

/// Serves `router` on an ephemeral port and returns its base URL.
pub fn serve(router: Router) -> String {
    let (tx, rx) = mpsc::channel::<SocketAddr>();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind");
            tx.send(listener.local_addr().expect("addr")).expect("send addr");
            axum::serve(listener, router).await.expect("serve");
        });
    });
    let addr = rx.recv().expect("server address");
    format!("http://{addr}/")
}

/// Starts a fresh fake tracker and returns its base URL and state.
pub fn start() -> (String, Shared) {
    let state = Shared::default();
    let base = serve(router(state.clone()));
    (base, state)
}

fn reply(status: StatusCode, body: &Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json;charset=UTF-8")],
        body.to_string(),
    )
        .into_response()
}

fn errors(status: StatusCode, message: &str) -> Response {
    reply(status, &json!({"errorMessages": [message], "errors": {}}))
}

fn field_errors(field: &str, message: &str) -> Response {
    reply(
        StatusCode::BAD_REQUEST,
        &json!({"errorMessages": [], "errors": {field: message}}),
    )
}

fn unauthorized() -> Response {
    errors(StatusCode::UNAUTHORIZED, "You are not authenticated.")
}

fn authorized(state: &Shared, headers: &HeaderMap) -> bool {
    state.lock().unwrap().requests += 1;
    headers.contains_key(header::AUTHORIZATION)
}

fn payload(body: &Bytes) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

fn text<'v>(value: &'v Value, pointer: &str) -> Option<&'v str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn project_json(id: &str, project: &Project) -> Value {
    json!({
        "id": id,
        "key": project.key,
        "name": project.name,
        "description": project.description,
        "projectTypeKey": "business",
        "self": format!("{SELF_ROOT}/project/{id}"),
    })
}

fn issue_json(id: &str, issue: &Issue) -> Value {
    json!({
        "id": id,
        "key": issue.key,
        "self": format!("{SELF_ROOT}/issue/{id}"),
        "fields": {"summary": issue.summary, "project": {"id": issue.project}},
    })
}

fn comment_json(id: &str, comment: &Comment) -> Value {
    json!({
        "id": id,
        "self": format!("{SELF_ROOT}/issue/{}/comment/{id}", comment.issue),
        "author": {"accountId": "acc-1"},
        "body": comment.body,
        "created": "2024-05-01T12:00:00.000+0000",
        "updated": "2024-05-01T12:00:00.000+0000",
    })
}

async fn create_project(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let Some(body) = payload(&body) else {
        return errors(StatusCode::BAD_REQUEST, "Unexpected end-of-input");
    };
    let (Some(key), Some(name)) = (text(&body, "/key"), text(&body, "/name")) else {
        return field_errors("projectKey", "You must specify a valid project key.");
    };
    let mut tracker = state.lock().unwrap();
    let id = tracker.allocate();
    tracker.projects.insert(
        id.to_string(),
        Project {
            key: key.to_string(),
            name: name.to_string(),
            description: None,
        },
    );
    reply(
        StatusCode::CREATED,
        &json!({"self": format!("{SELF_ROOT}/project/{id}"), "id": id, "key": key}),
    )
}

async fn get_project(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let tracker = state.lock().unwrap();
    match tracker.projects.get(&id) {
        Some(project) => reply(StatusCode::OK, &project_json(&id, project)),
        None => errors(StatusCode::NOT_FOUND, "No project could be found."),
    }
}

async fn update_project(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let Some(body) = payload(&body) else {
        return errors(StatusCode::BAD_REQUEST, "Unexpected end-of-input");
    };
    let mut tracker = state.lock().unwrap();
    let Some(project) = tracker.projects.get_mut(&id) else {
        return errors(StatusCode::NOT_FOUND, "No project could be found.");
    };
    if let Some(name) = text(&body, "/name") {
        project.name = name.to_string();
    }
    if let Some(description) = text(&body, "/description") {
        project.description = Some(description.to_string());
    }
    let project = project.clone();
    reply(StatusCode::OK, &project_json(&id, &project))
}

async fn delete_project(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut tracker = state.lock().unwrap();
    if tracker.projects.remove(&id).is_none() {
        tracker.stale_deletes.push(format!("project/{id}"));
        return errors(StatusCode::NOT_FOUND, "No project could be found.");
    }
    let owned: Vec<String> = tracker
        .issues
        .iter()
        .filter(|(_, issue)| issue.project == id)
        .map(|(issue_id, _)| issue_id.clone())
        .collect();
    for issue_id in owned {
        tracker.remove_issue(&issue_id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn create_issue(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let Some(body) = payload(&body) else {
        return errors(StatusCode::BAD_REQUEST, "Unexpected end-of-input");
    };
    let (Some(project), Some(summary)) = (
        text(&body, "/fields/project/id"),
        text(&body, "/fields/summary"),
    ) else {
        return field_errors("project", "Specify a valid project ID or key");
    };
    let mut tracker = state.lock().unwrap();
    let id = tracker.allocate().to_string();
    let issue = Issue {
        key: format!("EXU-{id}"),
        project: project.to_string(),
        summary: summary.to_string(),
    };
    let response = json!({
        "id": id,
        "key": issue.key,
        "self": format!("{SELF_ROOT}/issue/{id}"),
    });
    tracker.issues.insert(id, issue);
    reply(StatusCode::CREATED, &response)
}

async fn get_issue(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let tracker = state.lock().unwrap();
    match tracker.resolve_issue(&id) {
        Some(id) => reply(StatusCode::OK, &issue_json(&id, &tracker.issues[&id])),
        None => errors(
            StatusCode::NOT_FOUND,
            "Issue does not exist or you do not have permission to see it.",
        ),
    }
}

async fn update_issue(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let Some(body) = payload(&body) else {
        return errors(StatusCode::BAD_REQUEST, "Unexpected end-of-input");
    };
    let mut tracker = state.lock().unwrap();
    let Some(id) = tracker.resolve_issue(&id) else {
        return errors(
            StatusCode::NOT_FOUND,
            "Issue does not exist or you do not have permission to see it.",
        );
    };
    if let Some(summary) = text(&body, "/fields/summary") {
        if let Some(issue) = tracker.issues.get_mut(&id) {
            issue.summary = summary.to_string();
        }
    }
    if query.get("returnIssue").map(String::as_str) == Some("true") {
        reply(StatusCode::OK, &issue_json(&id, &tracker.issues[&id]))
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn delete_issue(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut tracker = state.lock().unwrap();
    match tracker.resolve_issue(&id) {
        Some(id) => {
            tracker.remove_issue(&id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => {
            tracker.stale_deletes.push(format!("issue/{id}"));
            errors(
                StatusCode::NOT_FOUND,
                "Issue does not exist or you do not have permission to see it.",
            )
        }
    }
}

async fn add_comment(
    State(state): State<Shared>,
    Path(issue): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let Some(body) = payload(&body) else {
        return errors(StatusCode::BAD_REQUEST, "Unexpected end-of-input");
    };
    let Some(doc) = body.get("body").filter(|doc| doc.is_object()).cloned() else {
        return field_errors("comment", "Comment body can not be empty!");
    };
    let mut tracker = state.lock().unwrap();
    let Some(issue) = tracker.resolve_issue(&issue) else {
        return errors(StatusCode::NOT_FOUND, "Issue does not exist.");
    };
    let id = tracker.allocate().to_string();
    let comment = Comment { issue, body: doc };
    let response = comment_json(&id, &comment);
    tracker.comments.insert(id, comment);
    reply(StatusCode::CREATED, &response)
}

fn find_comment(tracker: &Tracker, issue: &str, id: &str) -> Option<String> {
    let issue = tracker.resolve_issue(issue)?;
    tracker
        .comments
        .get(id)
        .filter(|comment| comment.issue == issue)
        .map(|_| id.to_string())
}

async fn get_comment(
    State(state): State<Shared>,
    Path((issue, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let tracker = state.lock().unwrap();
    match find_comment(&tracker, &issue, &id) {
        Some(id) => reply(StatusCode::OK, &comment_json(&id, &tracker.comments[&id])),
        None => errors(StatusCode::NOT_FOUND, "Can not find a comment."),
    }
}

async fn update_comment(
    State(state): State<Shared>,
    Path((issue, id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let Some(doc) = payload(&body).and_then(|body| body.get("body").cloned()) else {
        return errors(StatusCode::BAD_REQUEST, "Comment body can not be empty!");
    };
    let mut tracker = state.lock().unwrap();
    let Some(id) = find_comment(&tracker, &issue, &id) else {
        return errors(StatusCode::NOT_FOUND, "Can not find a comment.");
    };
    let Some(comment) = tracker.comments.get_mut(&id) else {
        return errors(StatusCode::NOT_FOUND, "Can not find a comment.");
    };
    comment.body = doc;
    let comment = comment.clone();
    reply(StatusCode::OK, &comment_json(&id, &comment))
}

async fn delete_comment(
    State(state): State<Shared>,
    Path((issue, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut tracker = state.lock().unwrap();
    match find_comment(&tracker, &issue, &id) {
        Some(id) => {
            tracker.comments.remove(&id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => {
            tracker.stale_deletes.push(format!("issue/{issue}/comment/{id}"));
            errors(StatusCode::NOT_FOUND, "Can not find a comment.")
        }
    }
}

/// Router implementing the project, issue and comment endpoints.
pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/project", post(create_project))
        .route(
            "/project/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/issue", post(create_issue))
        .route(
            "/issue/{id}",
            get(get_issue).put(update_issue).delete(delete_issue),
        )
        .route("/issue/{id}/comment", post(add_comment))
        .route(
            "/issue/{id}/comment/{comment}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .with_state(state)
}
