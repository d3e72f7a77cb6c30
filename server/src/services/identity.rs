//! Identity provider bridge.
//!
//! SYSTEM CONTEXT
//! ==============
//! Accounts live in an external GoTrue-compatible service. The server keeps
//! the provider's access token in an HTTP-only cookie and resolves it to a
//! [`SessionUser`] on every authenticated request, so the browser never
//! handles tokens directly.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use async_trait::async_trait;
use protocol::credentials::{Credentials, SessionUser};
use serde::Deserialize;

use crate::config::Config;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Credentials or token refused by the provider.
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),
    /// Transport failure or unexpected status.
    #[error("identity provider unavailable: {0}")]
    Upstream(String),
    #[error("unexpected identity provider response: {0}")]
    Decode(String),
}

/// A signed-in session as issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySession {
    pub access_token: String,
    /// Lifetime of `access_token` in seconds, when the provider states it.
    pub expires_in: Option<i64>,
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(IdentitySession),
    /// Account created; the provider waits for e-mail confirmation.
    PendingConfirmation,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<IdentitySession, IdentityError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, IdentityError>;

    async fn current_user(&self, access_token: &str) -> Result<SessionUser, IdentityError>;

    async fn send_recovery(&self, email: &str, redirect_to: &str) -> Result<(), IdentityError>;

    async fn update_password(&self, access_token: &str, password: &str) -> Result<(), IdentityError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;
}

// =============================================================================
// GOTRUE CLIENT
// =============================================================================

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserPayload> for SessionUser {
    fn from(payload: UserPayload) -> Self {
        Self { id: payload.id, email: payload.email }
    }
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    user: UserPayload,
}

impl From<SessionPayload> for IdentitySession {
    fn from(payload: SessionPayload) -> Self {
        Self { access_token: payload.access_token, expires_in: payload.expires_in, user: payload.user.into() }
    }
}

/// Sign-up returns a full session when confirmation is disabled, otherwise
/// just the pending user.
fn decode_sign_up(body: &str) -> Result<SignUpOutcome, IdentityError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| IdentityError::Decode(e.to_string()))?;
    if value.get("access_token").and_then(serde_json::Value::as_str).is_some() {
        let session: SessionPayload = serde_json::from_value(value).map_err(|e| IdentityError::Decode(e.to_string()))?;
        return Ok(SignUpOutcome::SignedIn(session.into()));
    }
    Ok(SignUpOutcome::PendingConfirmation)
}

/// Provider error bodies carry the reason under one of several keys.
fn error_reason(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_owned();
    };
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map_or_else(|| body.trim().to_owned(), str::to_owned)
}

/// Map a provider status: 400, 401, 403 and 422 are refusals, anything else
/// non-2xx is an outage.
fn classify(status: u16, body: &str) -> Result<(), IdentityError> {
    match status {
        200..=299 => Ok(()),
        400 | 401 | 403 | 422 => Err(IdentityError::Rejected(error_reason(body))),
        _ => Err(IdentityError::Upstream(format!("status {status}: {}", error_reason(body)))),
    }
}

pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl GoTrueClient {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self { http, base_url: config.identity_url.clone(), anon_key: config.identity_anon_key.clone() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, IdentityError> {
        let response = request
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| IdentityError::Upstream(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| IdentityError::Upstream(e.to_string()))?;
        classify(status, &body)?;
        Ok(body)
    }
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<IdentitySession, IdentityError> {
        let body = self
            .send(self.http.post(self.url("/token?grant_type=password")).json(credentials))
            .await?;
        let session: SessionPayload = serde_json::from_str(&body).map_err(|e| IdentityError::Decode(e.to_string()))?;
        Ok(session.into())
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpOutcome, IdentityError> {
        let body = self.send(self.http.post(self.url("/signup")).json(credentials)).await?;
        decode_sign_up(&body)
    }

    async fn current_user(&self, access_token: &str) -> Result<SessionUser, IdentityError> {
        let body = self.send(self.http.get(self.url("/user")).bearer_auth(access_token)).await?;
        let user: UserPayload = serde_json::from_str(&body).map_err(|e| IdentityError::Decode(e.to_string()))?;
        Ok(user.into())
    }

    async fn send_recovery(&self, email: &str, redirect_to: &str) -> Result<(), IdentityError> {
        let request = self
            .http
            .post(self.url("/recover"))
            .query(&[("redirect_to", redirect_to)])
            .json(&serde_json::json!({ "email": email }));
        self.send(request).await.map(|_| ())
    }

    async fn update_password(&self, access_token: &str, password: &str) -> Result<(), IdentityError> {
        let request = self
            .http
            .put(self.url("/user"))
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "password": password }));
        self.send(request).await.map(|_| ())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        self.send(self.http.post(self.url("/logout")).bearer_auth(access_token)).await.map(|_| ())
    }
}
