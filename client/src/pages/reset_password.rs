//! Password reset landing page for the link e-mailed by the identity
//! provider. The access token arrives in the URL fragment.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use protocol::credentials::{PasswordRule, PasswordUpdate, password_violations, validate_new_password};

/// Build the update request from the fragment token and the two fields.
///
/// # Errors
///
/// The inline message when the link carries no token or the new password
/// is unacceptable.
pub fn validate_reset_input(token: Option<&str>, password: &str, confirm: &str) -> Result<PasswordUpdate, String> {
    let Some(token) = token.filter(|token| !token.is_empty()) else {
        return Err("This reset link is invalid. Request a new one.".to_owned());
    };
    validate_new_password(password, confirm).map_err(|err| err.user_message())?;
    Ok(PasswordUpdate { access_token: token.to_owned(), password: password.to_owned() })
}

/// Checklist rows: every rule with whether `password` satisfies it.
#[must_use]
pub fn rule_checklist(password: &str) -> Vec<(PasswordRule, bool)> {
    let broken = password_violations(password);
    [
        PasswordRule::MinLength,
        PasswordRule::Uppercase,
        PasswordRule::Digit,
        PasswordRule::Symbol,
        PasswordRule::AllowedCharacters,
    ]
    .into_iter()
    .map(|rule| (rule, !broken.contains(&rule)))
    .collect()
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let token = RwSignal::new(None::<String>);
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);

    // The fragment is only visible in the browser.
    Effect::new(move || {
        let fragment = crate::util::browser::location_hash().unwrap_or_default();
        token.set(protocol::credentials::access_token_from_fragment(&fragment));
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let update = match validate_reset_input(
            token.get_untracked().as_deref(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(update) => update,
            Err(message) => {
                info.set(message);
                return;
            }
        };
        busy.set(true);
        info.set("Updating password...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_password(&update).await {
                Ok(()) => {
                    done.set(true);
                    info.set("Password updated. You can sign in now.".to_owned());
                }
                Err(err) => info.set(crate::net::api::reset_failure_message(&err)),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = update;
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"MedAI"</h1>
                <p class="login-card__subtitle">"Choose a new password"</p>
                <Show
                    when=move || !done.get()
                    fallback=|| view! { <a class="login-button" href="/login">"Go to sign in"</a> }
                >
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="password"
                            placeholder="New password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Confirm new password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                        <ul class="password-rules">
                            {move || {
                                rule_checklist(&password.get())
                                    .into_iter()
                                    .map(|(rule, ok)| {
                                        view! {
                                            <li class="password-rules__rule" class:password-rules__rule--ok=ok>
                                                {rule.message()}
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Update password"
                        </button>
                    </form>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
