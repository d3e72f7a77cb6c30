//! "Ask MedAI" conversation about the current analysis.

use leptos::prelude::*;
use protocol::ChatRole;
use workflow::{Workbench, WorkbenchCell};

use crate::actions;
use crate::state::workbench::WorkbenchSignal;
use crate::util::markdown::render_markdown_html;

/// Chat view. Mounting opens the chat; unmounting closes it, so a reply
/// still in flight is discarded once the user leaves.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let workbench = expect_context::<WorkbenchSignal>();

    let input = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    workbench.update(Workbench::open_chat);
    on_cleanup(move || {
        workbench.update(Workbench::close_chat);
    });

    let pending = move || workbench.with(|w| w.assistant().is_turn_pending());
    let has_context = move || workbench.with(|w| w.assistant().context().is_some());

    Effect::new(move || {
        let _count = workbench.with(|w| w.assistant().messages().len());

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let do_send = move || {
        let text = input.get_untracked();
        match actions::send_chat_message(workbench, &text) {
            Ok(()) => {
                input.set(String::new());
                notice.set(None);
            }
            Err(err) => notice.set(Some(err.user_message())),
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    view! {
        <section class="chat-panel">
            <header class="chat-panel__header">
                <h2>"Ask MedAI"</h2>
            </header>
            <Show when=move || !has_context()>
                <p class="chat-panel__hint">"Run an analysis first, then ask MedAI about its clusters."</p>
            </Show>
            <div class="chat-panel__messages" node_ref=messages_ref>
                {move || {
                    workbench
                        .with(|w| w.assistant().messages().to_vec())
                        .into_iter()
                        .map(|msg| {
                            let is_user = msg.role == ChatRole::User;
                            let body = if is_user {
                                view! { <p class="chat-panel__text">{msg.content}</p> }.into_any()
                            } else {
                                view! {
                                    <div class="chat-panel__text markdown" inner_html=render_markdown_html(&msg.content)></div>
                                }
                                    .into_any()
                            };
                            view! {
                                <div
                                    class="chat-panel__message"
                                    class:chat-panel__message--user=is_user
                                    class:chat-panel__message--assistant=!is_user
                                >
                                    {body}
                                </div>
                            }
                        })
                        .collect_view()
                }}
                <Show when=pending>
                    <div class="chat-panel__message chat-panel__message--assistant chat-panel__message--typing">
                        "MedAI is typing..."
                    </div>
                </Show>
            </div>
            <Show when=move || notice.get().is_some()>
                <p class="chat-panel__notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <div class="chat-panel__input-row">
                <textarea
                    class="chat-panel__input"
                    rows="2"
                    placeholder="Ask about your clusters..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                ></textarea>
                <button
                    class="btn btn--primary chat-panel__send"
                    on:click=move |_| do_send()
                    disabled=move || pending() || input.get().trim().is_empty()
                >
                    "Send"
                </button>
            </div>
        </section>
    }
}
