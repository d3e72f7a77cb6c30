//! Small `web-sys` wrappers: navigation, URL fragment, picked files.
//!
//! All of them no-op (or return `None`) outside the browser.

use protocol::DatasetFile;

/// Full-page navigation, used after sign-in and sign-out so the server sees
/// the new session cookie.
pub fn redirect(href: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(href).is_err() {
                log::warn!("navigation to {href} failed");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = href;
    }
}

/// Current URL fragment including the leading `#`, if any.
#[must_use]
pub fn location_hash() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .filter(|hash| !hash.is_empty())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Read the first file picked in a file input and hand it to `on_loaded`.
/// Nothing happens when no file was picked or it cannot be read.
pub fn read_picked_file(ev: &leptos::ev::Event, on_loaded: impl FnOnce(DatasetFile) + 'static) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast as _;

        let Some(file) = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        leptos::task::spawn_local(async move {
            match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                Ok(buffer) => {
                    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                    on_loaded(DatasetFile::new(file.name(), bytes));
                }
                Err(err) => log::warn!("reading {} failed: {err:?}", file.name()),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ev, on_loaded);
    }
}
