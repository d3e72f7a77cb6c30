//! Outbound service clients.
//!
//! ARCHITECTURE
//! ============
//! - `identity`: GoTrue-compatible identity provider (sessions, passwords).
//! - `medai`: upstream MedAI backend used by the authenticated proxy.

pub mod identity;
pub mod medai;
