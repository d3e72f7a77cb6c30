//! Identity wire types and credential rules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Identity is delegated to an external provider reached through the server.
//! The browser validates passwords with the same rules the forms advertise
//! before any request leaves the page, and the server re-checks them.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const PASSWORD_MIN_LEN: usize = 8;
/// The only non-alphanumeric characters a password may contain.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

pub const PASSWORD_POLICY_MESSAGE: &str =
    "Password must be at least 8 characters, include one uppercase letter, one number, and one special character.";

/// Signed-in user as reported by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// E-mail and password pair for sign-in and registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Trimmed e-mail plus password, rejecting blanks before any request.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the e-mail is blank or lacks `@`, or the
    /// password is empty.
    pub fn new(email: &str, password: &str) -> Result<Self, ApiError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::validation("Enter a valid e-mail address."));
        }
        if password.is_empty() {
            return Err(ApiError::validation("Enter your password."));
        }
        Ok(Self { email: email.to_owned(), password: password.to_owned() })
    }
}

/// Reply to a registration. `user` is absent while the provider waits for
/// the address to be confirmed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpReply {
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Body of a password-reset e-mail request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryRequest {
    pub email: String,
}

/// Body of a password update authorized by a reset token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordUpdate {
    pub access_token: String,
    pub password: String,
}

/// A single password requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Digit,
    Symbol,
    AllowedCharacters,
}

impl PasswordRule {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::MinLength => "At least 8 characters",
            Self::Uppercase => "At least one uppercase letter",
            Self::Digit => "At least one number",
            Self::Symbol => "At least one of @$!%*?&",
            Self::AllowedCharacters => "Only letters, numbers, and @$!%*?&",
        }
    }
}

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(ch)
}

/// Every rule `password` breaks, in display order.
#[must_use]
pub fn password_violations(password: &str) -> Vec<PasswordRule> {
    let mut broken = Vec::new();
    if password.chars().count() < PASSWORD_MIN_LEN {
        broken.push(PasswordRule::MinLength);
    }
    if !password.chars().any(|ch| ch.is_ascii_uppercase()) {
        broken.push(PasswordRule::Uppercase);
    }
    if !password.chars().any(|ch| ch.is_ascii_digit()) {
        broken.push(PasswordRule::Digit);
    }
    if !password.chars().any(|ch| PASSWORD_SYMBOLS.contains(ch)) {
        broken.push(PasswordRule::Symbol);
    }
    if !password.chars().all(is_allowed) {
        broken.push(PasswordRule::AllowedCharacters);
    }
    broken
}

/// # Errors
///
/// [`ApiError::Validation`] with [`PASSWORD_POLICY_MESSAGE`] when any rule fails.
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password_violations(password).is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(PASSWORD_POLICY_MESSAGE))
    }
}

/// Validate a new password against its confirmation field.
///
/// # Errors
///
/// [`ApiError::Validation`] when the policy fails or the two values differ.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ApiError> {
    validate_password(password)?;
    if password != confirm {
        return Err(ApiError::validation("Passwords do not match."));
    }
    Ok(())
}

/// Extract `access_token` from a URL fragment such as
/// `#access_token=abc&type=recovery`.
#[must_use]
pub fn access_token_from_fragment(fragment: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "access_token")
        .and_then(|(_, value)| urlencoding::decode(value).map(std::borrow::Cow::into_owned).ok())
        .filter(|token| !token.is_empty())
}
