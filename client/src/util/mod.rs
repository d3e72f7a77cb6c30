//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns and pure presentation math from
//! page and component logic so they can be unit-tested without a DOM.

pub mod auth;
pub mod browser;
pub mod chart;
pub mod markdown;
pub mod tips;
pub mod ui_persistence;
