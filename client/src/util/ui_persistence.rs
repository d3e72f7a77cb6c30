//! Remembered dashboard view.
//!
//! Stored in `localStorage` as the serde name of [`ActiveView`]. The cache
//! is advisory: anything unreadable restores as `None`, and the server side
//! never touches storage so SSR output stays deterministic.

use crate::state::ui::ActiveView;
#[cfg(feature = "hydrate")]
use crate::state::ui::ACTIVE_VIEW_STORAGE_KEY;

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

/// Last view saved by [`remember_active_view`], if it still parses.
#[must_use]
pub fn restore_active_view() -> Option<ActiveView> {
    #[cfg(feature = "hydrate")]
    {
        let raw = storage()?.get_item(ACTIVE_VIEW_STORAGE_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

pub fn remember_active_view(view: ActiveView) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(&view) else {
            return;
        };
        if storage.set_item(ACTIVE_VIEW_STORAGE_KEY, &raw).is_err() {
            log::debug!("active view not persisted: localStorage refused the write");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = view;
    }
}
