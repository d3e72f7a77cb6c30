//! MedAI proxy routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to `/api/medai/*` with the same paths the upstream
//! backend exposes. Each handler requires a session, rebuilds the upstream
//! URL from the session user, and relays status, content type, and body
//! back unchanged. Bodies are streamed so project downloads never buffer.

#[cfg(test)]
#[path = "medai_test.rs"]
mod medai_test;

use axum::body::Body;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use super::auth::{AuthUser, error_response};
use crate::services::medai::{ProxiedField, ProxiedValue, ProxyError};
use crate::state::AppState;

/// Largest request body accepted on the multipart routes.
pub const MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

/// Largest JSON body accepted on `/interpret` and `/chat`. Both carry the
/// full cluster payload of the current result.
pub const MAX_CONTEXT_BYTES: usize = 64 * 1024 * 1024;

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(reason) => error_response(StatusCode::BAD_REQUEST, reason),
            Self::Upstream(err) => {
                tracing::error!(error = %err, "medai upstream unreachable");
                error_response(StatusCode::BAD_GATEWAY, "MedAI service unavailable")
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub project_name: String,
}

/// Stream an upstream response back to the browser.
///
/// A 401 from this server always means the session cookie is invalid, so an
/// upstream 401 or 403 is reported as 502.
fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::error!(%status, url = %upstream.url(), "medai upstream refused the proxy");
        return error_response(StatusCode::BAD_GATEWAY, "MedAI service refused the request");
    }
    if !status.is_success() {
        tracing::warn!(%status, url = %upstream.url(), "medai upstream returned an error");
    }
    let mut builder = Response::builder().status(status);
    for name in [CONTENT_TYPE, CONTENT_DISPOSITION] {
        if let Some(value) = upstream.headers().get(&name) {
            builder = builder.header(name, value.clone());
        }
    }
    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response())
}

async fn read_fields(mut multipart: Multipart) -> Result<Vec<ProxiedField>, ProxyError> {
    let bad = |err: axum::extract::multipart::MultipartError| ProxyError::BadRequest(err.body_text());
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(bad)? {
        let name = field.name().unwrap_or_default().to_owned();
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(bad)?;
        let value = match file_name {
            Some(file_name) => ProxiedValue::File { file_name, content_type, bytes: bytes.to_vec() },
            None => ProxiedValue::Text(
                String::from_utf8(bytes.to_vec())
                    .map_err(|_| ProxyError::BadRequest(format!("field {name:?} is not UTF-8")))?,
            ),
        };
        fields.push(ProxiedField { name, value });
    }
    Ok(fields)
}

// =============================================================================
// POST
// =============================================================================

/// `POST /api/medai/clustering/clustering`
pub async fn clustering(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Response, ProxyError> {
    let fields = read_fields(multipart).await?;
    let url = state.medai.endpoints().clustering();
    tracing::info!(user_id = %auth.user.id, "forwarding clustering request");
    Ok(relay(state.medai.post_form(&url, fields, &auth.user.id).await?))
}

/// `POST /api/medai/upload_medai`
pub async fn upload_report(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<Response, ProxyError> {
    let fields = read_fields(multipart).await?;
    let url = state.medai.endpoints().upload_report();
    Ok(relay(state.medai.post_form(&url, fields, &auth.user.id).await?))
}

/// `POST /api/medai/interpret`
pub async fn interpret(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ProxyError> {
    let url = state.medai.endpoints().interpret();
    Ok(relay(state.medai.post_json(&url, &body).await?))
}

/// `POST /api/medai/chat`
pub async fn chat(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ProxyError> {
    let url = state.medai.endpoints().chat();
    Ok(relay(state.medai.post_json(&url, &body).await?))
}

// =============================================================================
// GET
// =============================================================================

/// `GET /api/medai/projects`
pub async fn projects(State(state): State<AppState>, auth: AuthUser) -> Result<Response, ProxyError> {
    let url = state.medai.endpoints().projects(&auth.user.id);
    Ok(relay(state.medai.get(&url).await?))
}

/// `GET /api/medai/project-info?project_name=`
pub async fn project_info(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ProjectQuery>,
) -> Result<Response, ProxyError> {
    let url = state.medai.endpoints().project_info(&auth.user.id, &query.project_name);
    Ok(relay(state.medai.get(&url).await?))
}

/// `GET /api/medai/delete-project?project_name=`
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ProjectQuery>,
) -> Result<Response, ProxyError> {
    let url = state.medai.endpoints().delete_project(&auth.user.id, &query.project_name);
    tracing::info!(user_id = %auth.user.id, project = %query.project_name, "deleting project");
    Ok(relay(state.medai.get(&url).await?))
}

/// `GET /api/medai/download-proxy?project_name=`
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ProjectQuery>,
) -> Result<Response, ProxyError> {
    let url = state.medai.endpoints().download(&auth.user.id, &query.project_name);
    Ok(relay(state.medai.get(&url).await?))
}
