use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Request, header};
use axum::routing::{get, post};
use tower::ServiceExt;

use super::*;
use crate::routes::test_support::{FakeIdentity, app, body_bytes, body_json, session_header, spawn_upstream};

const BOUNDARY: &str = "medai-test-boundary";

/// Stand-in MedAI backend that echoes what it received.
fn upstream() -> Router {
    Router::new()
        .route(
            "/projects",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                Json(serde_json::json!({ "user_id": query.get("user_id") }))
            }),
        )
        .route("/project-info", get(|| async { (StatusCode::NOT_FOUND, "no such project") }))
        .route("/delete-project", get(|| async { (StatusCode::UNAUTHORIZED, "bad upstream key") }))
        .route(
            "/chat",
            post(|Json(body): Json<serde_json::Value>| async move {
                let points = body["clusters"]["points"].as_array().map_or(0, Vec::len);
                Json(serde_json::json!({ "role": "assistant", "content": format!("{points} points") }))
            })
            .layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/download-proxy",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                (
                    [
                        (CONTENT_TYPE, "application/zip"),
                        (CONTENT_DISPOSITION, "attachment; filename=\"results.zip\""),
                    ],
                    format!(
                        "{}/{}",
                        query.get("user_id").cloned().unwrap_or_default(),
                        query.get("project_name").cloned().unwrap_or_default()
                    ),
                )
            }),
        )
        .route(
            "/clustering/clustering",
            post(|mut multipart: Multipart| async move {
                let mut owners = Vec::new();
                let mut names = Vec::new();
                let mut file_name = None;
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_owned();
                    if field.file_name().is_some() {
                        file_name = field.file_name().map(str::to_owned);
                    }
                    let text = field.text().await.unwrap();
                    if name == "user_id" {
                        owners.push(text);
                    }
                    names.push(name);
                }
                Json(serde_json::json!({ "owners": owners, "fields": names, "file_name": file_name }))
            }),
        )
        .route(
            "/interpret",
            post(|Json(body): Json<serde_json::Value>| async move {
                Json(serde_json::json!({ "markdown_response": "ok", "received": body }))
            }),
        )
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::get(uri).header(header::COOKIE, session_header()).body(Body::empty()).unwrap()
}

fn clustering_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, file_name, value) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match file_name {
            Some(file_name) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: text/csv\r\n\r\n"
            )),
            None => body.push_str(&format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")),
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::post("/api/medai/clustering/clustering")
        .header(header::COOKIE, session_header())
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// OWNER IDENTITY
// =============================================================================

#[tokio::test]
async fn projects_query_uses_session_user() {
    let base = spawn_upstream(upstream()).await;
    let response = app(Arc::new(FakeIdentity::default()), &base)
        .oneshot(authed_get("/api/medai/projects?user_id=someone-else"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user_id"], "user-1");
}

#[tokio::test]
async fn clustering_form_owner_is_replaced() {
    let base = spawn_upstream(upstream()).await;
    let request = clustering_request(&[
        ("file", Some("genes.csv"), "sample,g1\ns1,0.5\n"),
        ("user_id", None, "intruder"),
        ("project_name", None, "demo"),
        ("algorithm", None, "kmeans"),
    ]);
    let response = app(Arc::new(FakeIdentity::default()), &base).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["owners"], serde_json::json!(["user-1"]));
    assert_eq!(body["file_name"], "genes.csv");
    let fields: Vec<String> = serde_json::from_value(body["fields"].clone()).unwrap();
    assert!(fields.contains(&"project_name".to_owned()));
    assert!(fields.contains(&"algorithm".to_owned()));
}

#[tokio::test]
async fn requests_without_session_never_reach_upstream() {
    let request = Request::get("/api/medai/projects").body(Body::empty()).unwrap();
    let response = app(Arc::new(FakeIdentity::default()), "http://medai.invalid")
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// RELAY
// =============================================================================

#[tokio::test]
async fn download_relays_headers_and_body() {
    let base = spawn_upstream(upstream()).await;
    let response = app(Arc::new(FakeIdentity::default()), &base)
        .oneshot(authed_get("/api/medai/download-proxy?project_name=demo%20run"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/zip");
    assert_eq!(response.headers()[CONTENT_DISPOSITION], "attachment; filename=\"results.zip\"");
    assert_eq!(body_bytes(response).await, b"user-1/demo run".to_vec());
}

#[tokio::test]
async fn upstream_error_status_is_passed_through() {
    let base = spawn_upstream(upstream()).await;
    let response = app(Arc::new(FakeIdentity::default()), &base)
        .oneshot(authed_get("/api/medai/project-info?project_name=missing"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(response).await, b"no such project".to_vec());
}

#[tokio::test]
async fn project_routes_require_project_name() {
    let base = spawn_upstream(upstream()).await;
    let response = app(Arc::new(FakeIdentity::default()), &base)
        .oneshot(authed_get("/api/medai/delete-project"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn interpret_forwards_json_body() {
    let base = spawn_upstream(upstream()).await;
    let request = Request::post("/api/medai/interpret")
        .header(header::COOKIE, session_header())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"cluster_summary":"three clusters"}"#))
        .unwrap();
    let response = app(Arc::new(FakeIdentity::default()), &base).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["received"]["cluster_summary"], "three clusters");
}

#[tokio::test]
async fn chat_accepts_context_larger_than_default_body_limit() {
    let points: Vec<serde_json::Value> = (0..30_000)
        .map(|i| {
            serde_json::json!({
                "x": f64::from(i) * 0.01,
                "y": f64::from(i) * -0.02,
                "cluster": i % 4,
                "metadata": { "sample": format!("Sample {i}"), "tissue": "breast" },
            })
        })
        .collect();
    let body = serde_json::json!({
        "messages": [{ "role": "user", "content": "How many clusters?" }],
        "manifest": { "algorithm": "kmeans", "n_clusters": 4 },
        "clusters": { "points": points },
        "xai": null,
        "labels": null,
    })
    .to_string();
    assert!(body.len() > 2 * 1024 * 1024);

    let base = spawn_upstream(upstream()).await;
    let request = Request::post("/api/medai/chat")
        .header(header::COOKIE, session_header())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app(Arc::new(FakeIdentity::default()), &base).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["content"], "30000 points");
}

#[tokio::test]
async fn upstream_refusal_is_not_reported_as_expired_session() {
    let base = spawn_upstream(upstream()).await;
    let response = app(Arc::new(FakeIdentity::default()), &base)
        .oneshot(authed_get("/api/medai/delete-project?project_name=demo"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let response = app(Arc::new(FakeIdentity::default()), &base)
        .oneshot(authed_get("/api/medai/projects"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn bad_request_maps_to_400() {
    let response = ProxyError::BadRequest("nope".to_owned()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
