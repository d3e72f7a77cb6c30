//! Authenticated dashboard shell: sidebar plus the active view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Redirects to `/login` once auth has loaded without a user. The active
//! view survives reloads through `localStorage`. An expired session reported
//! by any MedAI call signs the user out here, which triggers the redirect.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::chat_panel::ChatPanel;
use crate::components::interpretation_panel::InterpretationPanel;
use crate::components::projects_view::ProjectsView;
use crate::components::results_panel::ResultsPanel;
use crate::components::settings_panel::SettingsPanel;
use crate::components::settings_view::SettingsView;
use crate::components::sidebar::Sidebar;
use crate::components::tips_panel::TipsPanel;
use crate::components::tour_view::TourView;
use crate::state::auth::AuthState;
use crate::state::ui::{ActiveView, UiState};
use crate::state::workbench::WorkbenchSignal;
use crate::util::auth::{install_unauth_redirect, sign_out_on_auth_error};
use crate::util::ui_persistence::{remember_active_view, restore_active_view};

/// Greeting above the dashboard view.
#[must_use]
pub fn greeting(email: Option<&str>) -> String {
    match email.and_then(|email| email.split('@').next()).filter(|name| !name.is_empty()) {
        Some(name) => format!("Welcome back, {name}"),
        None => "Welcome back".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let workbench = expect_context::<WorkbenchSignal>();

    install_unauth_redirect(auth, use_navigate());

    // Views remount only when the active view itself changes; leaving the
    // chat view closes the chat.
    let active_view = Memo::new(move |_| ui.get().active_view);

    // Restore after hydration, then persist every change.
    Effect::new(move || {
        if let Some(view) = restore_active_view() {
            ui.update_untracked(|u| u.active_view = view);
            ui.notify();
        }
    });
    Effect::new(move || remember_active_view(active_view.get()));

    Effect::new(move || {
        if let Some(err) = workbench.with(|w| w.analysis().error().cloned()) {
            sign_out_on_auth_error(auth, &err);
        }
    });

    let on_sign_out = Callback::new(move |()| {
        auth.set(AuthState::signed_out());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            crate::util::browser::redirect("/login");
        });
    });

    view! {
        <Show
            when=move || auth.get().user.is_some()
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <Sidebar on_sign_out=on_sign_out/>
                <main class="dashboard-page__main">
                    <header class="dashboard-page__header">
                        <button
                            class="btn dashboard-page__menu"
                            aria-label="Toggle navigation"
                            on:click=move |_| ui.update(|u| u.sidebar_open = !u.sidebar_open)
                        >
                            "☰"
                        </button>
                        <h1>{move || active_view.get().label()}</h1>
                        <span class="dashboard-page__greeting">{move || greeting(auth.get().email())}</span>
                    </header>
                    {move || match active_view.get() {
                        ActiveView::Dashboard => {
                            view! {
                                <TipsPanel/>
                                <div class="dashboard-page__grid">
                                    <SettingsPanel/>
                                    <ResultsPanel/>
                                </div>
                                <InterpretationPanel/>
                            }
                                .into_any()
                        }
                        ActiveView::Projects => view! { <ProjectsView/> }.into_any(),
                        ActiveView::Chat => view! { <ChatPanel/> }.into_any(),
                        ActiveView::Tour => view! { <TourView/> }.into_any(),
                        ActiveView::Settings => view! { <SettingsView on_sign_out=on_sign_out/> }.into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}
