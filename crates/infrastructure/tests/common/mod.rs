//! Fake tracker served by axum on a background runtime.
#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::mpsc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Json;
use serde_json::{Value, json};

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

/// Returns a URL on a port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/issue/1")
}

async fn get_issue(Path(id): Path<String>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json;charset=UTF-8")],
        Json(json!({"id": id, "key": "EXU-1", "fields": {"summary": "Epic issue from fixture"}})),
    )
}

async fn delete_issue() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn missing() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "errorMessages": ["Issue does not exist or you do not have permission to see it."],
            "errors": {}
        })),
    )
}

async fn empty_error() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn html() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html")], "<html><body>maintenance</body></html>")
}

async fn duplicate_headers() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, "a=1".parse().unwrap());
    headers.append(header::SET_COOKIE, "b=2".parse().unwrap());
    (headers, Json(json!({})))
}

async fn echo(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    (
        StatusCode::CREATED,
        Json(json!({
            "authorization": header_value(header::AUTHORIZATION),
            "accept": header_value(header::ACCEPT),
            "content_type": header_value(header::CONTENT_TYPE),
            "params": params,
            "body": serde_json::from_slice::<Value>(&body).ok(),
        })),
    )
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    Json(json!({"late": true}))
}

/// Returns a URL on a non-routable address, so connecting never completes.
pub fn blackholed_url() -> String {
    "http://10.255.255.1:81/issue/1".to_string()
}

/// Router with the endpoints the executor tests hit.
pub fn tracker() -> Router {
    Router::new()
        .route("/issue/{id}", get(get_issue).delete(delete_issue))
        .route("/missing", get(missing))
        .route("/empty-error", get(empty_error))
        .route("/html", get(html))
        .route("/duplicate", get(duplicate_headers))
        .route("/echo", post(echo).put(echo))
        .route("/slow", get(slow))
}
