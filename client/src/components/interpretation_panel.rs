//! MedAI's interpretation of the current result.
//!
//! Shows a loading state while the interpretation is fetched, renders the
//! markdown once it lands, and offers three follow-ups: clear the text,
//! continue the conversation in the chat view, or save it as a report.

use leptos::prelude::*;
use workflow::{Workbench, WorkbenchCell};

use crate::actions::{self, SaveStatus};
use crate::state::auth::AuthState;
use crate::state::ui::{ActiveView, UiState};
use crate::state::workbench::WorkbenchSignal;
use crate::util::markdown::render_markdown_html;

#[component]
pub fn InterpretationPanel() -> impl IntoView {
    let workbench = expect_context::<WorkbenchSignal>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let save_status = RwSignal::new(SaveStatus::Idle);

    let has_context = move || workbench.with(|w| w.assistant().context().is_some());
    let loading = move || workbench.with(|w| w.assistant().interpretation().is_loading);
    let text = move || workbench.with(|w| w.assistant().interpretation().text.clone());
    let is_error = move || workbench.with(|w| w.assistant().interpretation().is_error);
    let can_save = move || workbench.with(|w| w.assistant().report_text().is_some());

    // A new interpretation resets the save state.
    Effect::new(move || {
        text();
        save_status.set(SaveStatus::Idle);
    });

    let on_continue = move |_| {
        workbench.update(Workbench::open_chat);
        ui.update(|u| {
            u.show(ActiveView::Chat);
        });
    };

    view! {
        <Show when=has_context>
            <section class="interpretation-panel">
                <header class="interpretation-panel__header">
                    <h2>"MedAI interpretation"</h2>
                </header>
                <Show
                    when=move || !loading()
                    fallback=|| view! { <p class="interpretation-panel__loading">"MedAI is reading your clusters..."</p> }
                >
                    {move || match text() {
                        Some(body) => {
                            view! {
                                <div
                                    class="interpretation-panel__body markdown"
                                    class:interpretation-panel__body--error=is_error
                                    inner_html=render_markdown_html(&body)
                                ></div>
                            }
                                .into_any()
                        }
                        None => view! { <p class="interpretation-panel__empty">"Interpretation cleared."</p> }.into_any(),
                    }}
                    <div class="interpretation-panel__actions">
                        <Show when=move || text().is_some()>
                            <button
                                class="btn"
                                on:click=move |_| {
                                    workbench.update(Workbench::clear_interpretation);
                                }
                            >
                                "Clear text"
                            </button>
                        </Show>
                        <button class="btn btn--primary" on:click=on_continue>
                            "Continue with MedAI"
                        </button>
                        <button
                            class="btn"
                            disabled=move || !can_save() || save_status.get() == SaveStatus::Saving
                            on:click=move |_| actions::save_report(workbench, auth, save_status)
                        >
                            "Save as report"
                        </button>
                    </div>
                    {move || match save_status.get() {
                        SaveStatus::Idle => ().into_any(),
                        SaveStatus::Saving => view! { <p class="interpretation-panel__status">"Saving report..."</p> }.into_any(),
                        SaveStatus::Saved => {
                            view! { <p class="interpretation-panel__status">"Report saved to your project."</p> }.into_any()
                        }
                        SaveStatus::Failed(message) => {
                            view! { <p class="interpretation-panel__status interpretation-panel__status--error">{message}</p> }
                                .into_any()
                        }
                    }}
                </Show>
            </section>
        </Show>
    }
}
