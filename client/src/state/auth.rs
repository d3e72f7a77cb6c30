//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards redirect to `/login` once loading finishes with no user. The
//! user id doubles as the owner identity of every MedAI request.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use protocol::credentials::SessionUser;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Default for AuthState {
    /// Loading until `/api/auth/me` answers.
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user), loading: false }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { user: None, loading: false }
    }

    /// Owner identity for MedAI requests.
    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.email.as_deref())
    }

    /// Loading finished without a session.
    #[must_use]
    pub fn needs_login(&self) -> bool {
        !self.loading && self.user.is_none()
    }
}
