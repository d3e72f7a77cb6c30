//! `/api/env-check`: which settings the running server picked up.
//!
//! Reports presence only. Secrets never leave the process.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvReport {
    pub medai_api_base_url: String,
    pub identity_url: String,
    pub has_identity_anon_key: bool,
    pub public_url: String,
    pub cookie_secure: bool,
}

pub async fn env_check(State(state): State<AppState>) -> Json<EnvReport> {
    let config = &state.config;
    Json(EnvReport {
        medai_api_base_url: config.medai_api_base_url.clone(),
        identity_url: config.identity_url.clone(),
        has_identity_anon_key: !config.identity_anon_key.is_empty(),
        public_url: config.public_url.clone(),
        cookie_secure: config.cookie_secure,
    })
}
