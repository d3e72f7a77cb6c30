//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical unauthenticated redirect behavior, and
//! every page loads the session the same way.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use protocol::ApiError;

use crate::state::auth::AuthState;

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    state.needs_login()
}

/// An expired session surfaced by a MedAI call signs the user out locally,
/// which in turn triggers the redirect.
pub fn sign_out_on_auth_error(auth: RwSignal<AuthState>, err: &ApiError) {
    if matches!(err, ApiError::Auth) {
        auth.set(AuthState::signed_out());
    }
}

/// Load the session once after hydration.
pub fn load_session(auth: RwSignal<AuthState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let state = match crate::net::api::fetch_current_user().await {
            Some(user) => AuthState::signed_in(user),
            None => AuthState::signed_out(),
        };
        auth.set(state);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = auth;
}
