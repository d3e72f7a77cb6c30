//! Left navigation between dashboard views.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::ui::{ActiveView, UiState};

#[component]
pub fn Sidebar(#[prop(into)] on_sign_out: Callback<()>) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let active = move || ui.get().active_view;

    view! {
        <nav class="sidebar" class:sidebar--open=move || ui.get().sidebar_open>
            <div class="sidebar__brand">"MedAI"</div>
            <ul class="sidebar__items">
                {ActiveView::ALL
                    .into_iter()
                    .map(|view| {
                        view! {
                            <li>
                                <button
                                    class="sidebar__item"
                                    class:sidebar__item--active=move || active() == view
                                    on:click=move |_| {
                                        ui.update(|u| {
                                            u.show(view);
                                        });
                                    }
                                >
                                    <span class="sidebar__icon" aria-hidden="true">{view.icon()}</span>
                                    <span class="sidebar__label">{view.label()}</span>
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="sidebar__footer">
                <span class="sidebar__email">{move || auth.get().email().unwrap_or_default().to_owned()}</span>
                <button class="btn sidebar__sign-out" on:click=move |_| on_sign_out.run(())>
                    "Sign out"
                </button>
            </div>
        </nav>
    }
}
