//! Session endpoints served by our own server under `/api/auth`.
//!
//! ERROR HANDLING
//! ==============
//! Helpers return `Result<_, ApiError>`; the pages turn failures into inline
//! messages with the `*_failure_message` functions below.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use protocol::ApiError;
use protocol::credentials::{Credentials, PasswordUpdate, RecoveryRequest, SessionUser, SignUpReply};

use super::http;

pub const AUTH_ME_PATH: &str = "/api/auth/me";
pub const AUTH_LOGIN_PATH: &str = "/api/auth/login";
pub const AUTH_REGISTER_PATH: &str = "/api/auth/register";
pub const AUTH_LOGOUT_PATH: &str = "/api/auth/logout";
pub const AUTH_RECOVER_PATH: &str = "/api/auth/recover";
pub const AUTH_PASSWORD_PATH: &str = "/api/auth/password";

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::Server(err.to_string()))
}

/// Fetch the signed-in user. `None` when there is no session or on the server.
pub async fn fetch_current_user() -> Option<SessionUser> {
    let body = http::get(AUTH_ME_PATH).await.ok()?;
    decode(&body).ok()
}

/// # Errors
///
/// [`ApiError::Auth`] for rejected credentials, otherwise transport errors.
pub async fn login(credentials: &Credentials) -> Result<SessionUser, ApiError> {
    let body = http::post_json(AUTH_LOGIN_PATH, credentials).await?;
    decode(&body)
}

/// Register a new account. The reply carries no user while the provider
/// waits for e-mail confirmation.
///
/// # Errors
///
/// Transport or provider errors.
pub async fn register(credentials: &Credentials) -> Result<SignUpReply, ApiError> {
    let body = http::post_json(AUTH_REGISTER_PATH, credentials).await?;
    decode(&body)
}

/// End the session. Failures are logged; the caller signs out locally anyway.
pub async fn logout() {
    if let Err(err) = http::post_empty(AUTH_LOGOUT_PATH).await {
        #[cfg(feature = "hydrate")]
        log::warn!("logout failed [{}]: {err}", err.code());
        #[cfg(not(feature = "hydrate"))]
        let _ = err;
    }
}

/// Ask the provider to e-mail a password-reset link.
///
/// # Errors
///
/// Transport or provider errors.
pub async fn request_password_reset(request: &RecoveryRequest) -> Result<(), ApiError> {
    http::post_json(AUTH_RECOVER_PATH, request).await.map(|_| ())
}

/// Set a new password using the access token from the reset link.
///
/// # Errors
///
/// [`ApiError::Auth`] when the token expired, otherwise transport errors.
pub async fn update_password(update: &PasswordUpdate) -> Result<(), ApiError> {
    http::post_json(AUTH_PASSWORD_PATH, update).await.map(|_| ())
}

#[must_use]
pub fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Auth => "Invalid e-mail or password.".to_owned(),
        ApiError::Validation(message) => message.clone(),
        ApiError::Network(_) | ApiError::Server(_) => "Sign-in failed. Please try again.".to_owned(),
    }
}

#[must_use]
pub fn reset_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Auth => "This reset link has expired. Request a new one.".to_owned(),
        ApiError::Validation(message) => message.clone(),
        ApiError::Network(_) | ApiError::Server(_) => "Could not update the password. Please try again.".to_owned(),
    }
}
