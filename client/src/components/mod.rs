//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard views while reading shared state from Leptos
//! context providers. Anything that reaches the backend goes through
//! `crate::actions`.

pub mod chat_panel;
pub mod cluster_chart;
pub mod failure_banner;
pub mod interpretation_panel;
pub mod project_dialog;
pub mod projects_view;
pub mod results_panel;
pub mod settings_panel;
pub mod settings_view;
pub mod sidebar;
pub mod tips_panel;
pub mod tour_view;
