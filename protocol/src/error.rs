//! Error taxonomy shared by every MedAI call site.
//!
//! ERROR HANDLING
//! ==============
//! Four kinds cover every failure a caller can observe:
//! - `Validation` is detected locally and never reaches the network.
//! - `Auth` means no owner identity is available (or the session expired).
//! - `Network` covers transport failures and non-success statuses.
//! - `Server` is a success status whose payload lacks the expected shape.
//!
//! Analysis failures surface through [`ApiError::user_message`]; assistant
//! failures are replaced by [`ASSISTANT_ERROR_PLACEHOLDER`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Text shown in place of an interpretation or chat reply that failed.
pub const ASSISTANT_ERROR_PLACEHOLDER: &str = "❌ Error while contacting MedAI.";

/// Failure returned by any MedAI backend operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Input rejected before any network call.
    #[error("validation failed: {0}")]
    Validation(String),
    /// No authenticated owner identity.
    #[error("not authenticated")]
    Auth,
    /// Transport failure or non-2xx status.
    #[error("network error: {0}")]
    Network(String),
    /// 2xx response whose payload is missing or malformed.
    #[error("unexpected server response: {0}")]
    Server(String),
}

impl ApiError {
    /// Build a [`ApiError::Validation`] from any displayable message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Stable machine-readable code, mirroring the `E_*` convention used in logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Auth => "E_AUTH",
            Self::Network(_) => "E_NETWORK",
            Self::Server(_) => "E_SERVER",
        }
    }

    /// Whether resubmitting the same request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server(_))
    }

    /// Human-readable message suitable for an inline banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Auth => "Your session has expired. Please sign in again.".to_owned(),
            Self::Network(_) => "Could not reach the MedAI service. Please try again.".to_owned(),
            Self::Server(_) => "The MedAI service returned an unexpected response.".to_owned(),
        }
    }
}
