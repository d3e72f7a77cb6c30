//! Account settings: e-mail, password reset link, sign out.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn SettingsView(#[prop(into)] on_sign_out: Callback<()>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let info = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_reset = move |_| {
        if busy.get_untracked() {
            return;
        }
        let Some(email) = auth.get_untracked().email().map(str::to_owned) else {
            info.set(Some("No e-mail address on this account.".to_owned()));
            return;
        };
        busy.set(true);
        info.set(Some("Sending reset link...".to_owned()));

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let request = protocol::credentials::RecoveryRequest { email };
            let message = match crate::net::api::request_password_reset(&request).await {
                Ok(()) => "Check your inbox for a password reset link.".to_owned(),
                Err(err) => crate::net::api::reset_failure_message(&err),
            };
            info.set(Some(message));
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = email;
    };

    view! {
        <section class="settings-view">
            <h2>"Settings"</h2>
            <dl class="settings-view__account">
                <dt>"E-mail"</dt>
                <dd>{move || auth.get().email().unwrap_or("—").to_owned()}</dd>
            </dl>
            <div class="settings-view__actions">
                <button class="btn" on:click=on_reset disabled=move || busy.get()>
                    "E-mail me a password reset link"
                </button>
                <button class="btn btn--danger" on:click=move |_| on_sign_out.run(())>
                    "Sign out"
                </button>
            </div>
            <Show when=move || info.get().is_some()>
                <p class="settings-view__info">{move || info.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}
