//! Dashboard chrome state: which view is active.
//!
//! DESIGN
//! ======
//! The active view is one tagged variant consumed everywhere with exhaustive
//! matches, so adding a view is a compile error until every switch handles it.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use serde::{Deserialize, Serialize};

/// `localStorage` key holding the last active view.
pub const ACTIVE_VIEW_STORAGE_KEY: &str = "medai_active_view";

/// Primary content area of the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Dashboard,
    Projects,
    Chat,
    Tour,
    Settings,
}

impl ActiveView {
    /// Sidebar order.
    pub const ALL: [Self; 5] = [Self::Dashboard, Self::Projects, Self::Chat, Self::Tour, Self::Settings];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Projects => "Projects",
            Self::Chat => "Ask MedAI",
            Self::Tour => "Take a tour",
            Self::Settings => "Settings",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "▦",
            Self::Projects => "📁",
            Self::Chat => "💬",
            Self::Tour => "▶",
            Self::Settings => "⚙",
        }
    }
}

/// UI state for the dashboard shell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub active_view: ActiveView,
    /// Sidebar visibility on narrow screens.
    pub sidebar_open: bool,
}

impl UiState {
    /// Switch views, closing the narrow-screen sidebar. Returns whether the
    /// view changed.
    pub fn show(&mut self, view: ActiveView) -> bool {
        self.sidebar_open = false;
        if self.active_view == view {
            return false;
        }
        self.active_view = view;
        true
    }
}
