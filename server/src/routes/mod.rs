//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the auth and MedAI proxy endpoints and stitches them
//! with Leptos SSR rendering under a single Axum router.

pub mod auth;
pub mod env;
pub mod medai;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// API routes: session auth plus the MedAI proxy.
pub(crate) fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = Router::new()
        .route("/clustering/clustering", post(medai::clustering))
        .route("/upload_medai", post(medai::upload_report))
        .layer(DefaultBodyLimit::max(medai::MAX_UPLOAD_BYTES));

    let assistant = Router::new()
        .route("/interpret", post(medai::interpret))
        .route("/chat", post(medai::chat))
        .layer(DefaultBodyLimit::max(medai::MAX_CONTEXT_BYTES));

    let proxy = Router::new()
        .route("/projects", get(medai::projects))
        .route("/project-info", get(medai::project_info))
        .route("/delete-project", get(medai::delete_project))
        .route("/download-proxy", get(medai::download))
        .merge(uploads)
        .merge(assistant);

    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/recover", post(auth::recover))
        .route("/api/auth/password", post(auth::password))
        .route("/api/env-check", get(env::env_check))
        .nest("/api/medai", proxy)
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// API routes + Leptos SSR pages + the compiled site assets under `/pkg`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
