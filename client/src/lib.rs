//! # client
//!
//! Leptos + WASM frontend for the MedAI clustering dashboard.
//!
//! Pages and components render state held in context signals. Everything
//! that talks to the MedAI backend goes through `actions`, which drives the
//! `workflow` crate's workbench over the same-origin proxy.

pub mod actions;
pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"console logger already installed".into());
    }
    leptos::mount::hydrate_body(app::App);
}
