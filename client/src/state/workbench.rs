//! Reactive holder for the analysis workbench.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views subscribe through [`WorkbenchSignal::with`], and the async driver
//! mutates through [`WorkbenchCell`]. Once the owning scope is disposed the
//! signal stops accepting updates, so late responses are dropped instead of
//! touching a torn-down view.

#[cfg(test)]
#[path = "workbench_test.rs"]
mod workbench_test;

use leptos::prelude::*;
use workflow::{Workbench, WorkbenchCell};

#[derive(Clone, Copy, Debug)]
pub struct WorkbenchSignal(RwSignal<Workbench>);

impl WorkbenchSignal {
    #[must_use]
    pub fn new() -> Self {
        Self(RwSignal::new(Workbench::default()))
    }

    /// Tracked read of the current snapshot.
    pub fn with<R>(&self, f: impl FnOnce(&Workbench) -> R) -> R {
        self.0.with(f)
    }

    /// Untracked read, for event handlers.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&Workbench) -> R) -> R {
        self.0.with_untracked(f)
    }
}

impl Default for WorkbenchSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbenchCell for WorkbenchSignal {
    fn update<R>(&self, f: impl FnOnce(&mut Workbench) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}
