//! Shared client state provided through Leptos context.
//!
//! ARCHITECTURE
//! ============
//! `App` provides each holder exactly once. The analysis workflow itself lives
//! in [`workbench::WorkbenchSignal`]; the other holders carry presentation and
//! page-level data that never crosses into the orchestration core.

pub mod analysis_form;
pub mod auth;
pub mod projects;
pub mod ui;
pub mod workbench;
