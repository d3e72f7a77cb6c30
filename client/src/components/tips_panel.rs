//! Tip banner that rotates every few seconds while mounted.

use leptos::prelude::*;

use crate::util::tips::tip_at;

#[component]
pub fn TipsPanel() -> impl IntoView {
    let tick = RwSignal::new(0_usize);

    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(crate::util::tips::TIP_INTERVAL_SECS)).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                tick.update(|t| *t = t.wrapping_add(1));
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    view! {
        <aside class="tips-panel">
            <span class="tips-panel__label">"Tip"</span>
            <p class="tips-panel__text">{move || tip_at(tick.get())}</p>
        </aside>
    }
}
