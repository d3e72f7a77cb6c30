//! Shared wire model for the MedAI clustering workbench.
//!
//! This crate owns the request and response shapes of the external MedAI
//! backend, the error taxonomy every caller reports through, and the small
//! pure helpers (endpoint paths, prompt templates, credential rules) that the
//! browser client, the server proxy, and the CLI must agree on. It performs no
//! I/O: transports live in the crates that depend on it.

pub mod codec;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod prompt;
pub mod types;

pub use error::{ASSISTANT_ERROR_PLACEHOLDER, ApiError};
pub use types::*;
