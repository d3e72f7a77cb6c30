//! Browser networking.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` wraps `gloo-net` and maps every outcome onto [`protocol::ApiError`].
//! `api` covers the session endpoints served by our own server, and
//! `backend` implements [`workflow::Backend`] against the MedAI proxy.

pub mod api;
pub mod backend;
mod http;
