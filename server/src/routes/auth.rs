//! Auth routes: session cookie bridge to the identity provider.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use protocol::credentials::{
    Credentials, PasswordUpdate, RecoveryRequest, SessionUser, SignUpReply, validate_password,
};
use time::Duration;

use crate::services::identity::{IdentityError, IdentitySession, SignUpOutcome};
use crate::state::AppState;

pub const COOKIE_NAME: &str = "medai_session";

fn session_cookie(session: &IdentitySession, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((COOKIE_NAME, session.access_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    if let Some(seconds) = session.expires_in.filter(|s| *s > 0) {
        cookie = cookie.max_age(Duration::seconds(seconds));
    }
    cookie.build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

fn identity_failure(err: &IdentityError, rejected: StatusCode) -> Response {
    match err {
        IdentityError::Rejected(reason) => error_response(rejected, reason.clone()),
        IdentityError::Upstream(_) | IdentityError::Decode(_) => {
            tracing::error!(error = %err, "identity provider call failed");
            error_response(StatusCode::BAD_GATEWAY, "Identity service unavailable")
        }
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user resolved from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(error_response(StatusCode::UNAUTHORIZED, "Not signed in"));
        }

        let app_state = AppState::from_ref(state);
        let user = app_state
            .identity
            .current_user(token)
            .await
            .map_err(|err| identity_failure(&err, StatusCode::UNAUTHORIZED))?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/me`: current user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/login`: password sign-in, sets the session cookie.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(body): Json<Credentials>) -> Response {
    let credentials = match Credentials::new(&body.email, &body.password) {
        Ok(credentials) => credentials,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.user_message()),
    };
    match state.identity.sign_in(&credentials).await {
        Ok(session) => {
            tracing::info!(user_id = %session.user.id, "signed in");
            let jar = jar.add(session_cookie(&session, state.config.cookie_secure));
            (jar, Json(session.user)).into_response()
        }
        Err(err) => identity_failure(&err, StatusCode::UNAUTHORIZED),
    }
}

/// `POST /api/auth/register`: create an account. Signs in immediately when
/// the provider does not require e-mail confirmation.
pub async fn register(State(state): State<AppState>, jar: CookieJar, Json(body): Json<Credentials>) -> Response {
    let credentials = match Credentials::new(&body.email, &body.password) {
        Ok(credentials) => credentials,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.user_message()),
    };
    if let Err(err) = validate_password(&credentials.password) {
        return error_response(StatusCode::BAD_REQUEST, err.user_message());
    }
    match state.identity.sign_up(&credentials).await {
        Ok(SignUpOutcome::SignedIn(session)) => {
            let jar = jar.add(session_cookie(&session, state.config.cookie_secure));
            (jar, Json(SignUpReply { user: Some(session.user) })).into_response()
        }
        Ok(SignUpOutcome::PendingConfirmation) => Json(SignUpReply { user: None }).into_response(),
        Err(err) => identity_failure(&err, StatusCode::BAD_REQUEST),
    }
}

/// `POST /api/auth/logout`: revoke the provider session (best effort) and
/// clear the cookie. Works with an already expired session.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let token = jar.get(COOKIE_NAME).map(|cookie| cookie.value().to_owned()).unwrap_or_default();
    if !token.is_empty() {
        if let Err(err) = state.identity.sign_out(&token).await {
            tracing::warn!(error = %err, "provider sign-out failed; clearing cookie anyway");
        }
    }
    let jar = jar.add(cleared_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT).into_response()
}

/// `POST /api/auth/recover`: e-mail a password reset link.
pub async fn recover(State(state): State<AppState>, Json(body): Json<RecoveryRequest>) -> Response {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return error_response(StatusCode::BAD_REQUEST, "Enter a valid e-mail address.");
    }
    match state.identity.send_recovery(email, &state.config.reset_redirect_url()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => identity_failure(&err, StatusCode::BAD_REQUEST),
    }
}

/// `POST /api/auth/password`: set a new password with the reset token.
pub async fn password(State(state): State<AppState>, Json(body): Json<PasswordUpdate>) -> Response {
    if let Err(err) = validate_password(&body.password) {
        return error_response(StatusCode::BAD_REQUEST, err.user_message());
    }
    if body.access_token.trim().is_empty() {
        return error_response(StatusCode::UNAUTHORIZED, "Missing reset token");
    }
    match state.identity.update_password(&body.access_token, &body.password).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => identity_failure(&err, StatusCode::UNAUTHORIZED),
    }
}
