//! Sign-in page with registration and password recovery modes.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use protocol::credentials::{Credentials, RecoveryRequest, SignUpReply, validate_new_password};

use crate::state::auth::AuthState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginMode {
    #[default]
    SignIn,
    Register,
    Forgot,
}

impl LoginMode {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in to MedAI",
            Self::Register => "Create your account",
            Self::Forgot => "Reset your password",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::Register => "Create account",
            Self::Forgot => "Send reset link",
        }
    }
}

/// What a validated form submits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginSubmission {
    SignIn(Credentials),
    Register(Credentials),
    Forgot(RecoveryRequest),
}

/// Check the form fields for `mode` before any request is made.
///
/// # Errors
///
/// The message to show inline.
pub fn validate_login_input(
    mode: LoginMode,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<LoginSubmission, String> {
    match mode {
        LoginMode::SignIn => Credentials::new(email, password)
            .map(LoginSubmission::SignIn)
            .map_err(|err| err.user_message()),
        LoginMode::Register => {
            let credentials = Credentials::new(email, password).map_err(|err| err.user_message())?;
            validate_new_password(password, confirm).map_err(|err| err.user_message())?;
            Ok(LoginSubmission::Register(credentials))
        }
        LoginMode::Forgot => {
            let email = email.trim();
            if email.is_empty() || !email.contains('@') {
                return Err("Enter a valid e-mail address.".to_owned());
            }
            Ok(LoginSubmission::Forgot(RecoveryRequest { email: email.to_owned() }))
        }
    }
}

/// Message after registering. A reply without a user is waiting for the
/// address to be confirmed.
#[must_use]
pub fn register_outcome_message(reply: &SignUpReply) -> Option<&'static str> {
    if reply.user.is_some() { None } else { Some("Check your inbox to confirm your e-mail, then sign in.") }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let mode = RwSignal::new(LoginMode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // An existing session skips the form.
    Effect::new(move || {
        if auth.get().user.is_some() {
            crate::util::browser::redirect("/dashboard");
        }
    });

    let switch_mode = move |next: LoginMode| {
        mode.set(next);
        info.set(String::new());
        password.set(String::new());
        confirm.set(String::new());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let submission = match validate_login_input(
            mode.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
            Ok(submission) => submission,
            Err(message) => {
                info.set(message);
                return;
            }
        };
        busy.set(true);
        info.set("Working...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api;
            match submission {
                LoginSubmission::SignIn(credentials) => match api::login(&credentials).await {
                    Ok(user) => {
                        auth.set(AuthState::signed_in(user));
                        crate::util::browser::redirect("/dashboard");
                    }
                    Err(err) => info.set(api::login_failure_message(&err)),
                },
                LoginSubmission::Register(credentials) => match api::register(&credentials).await {
                    Ok(reply) => match register_outcome_message(&reply) {
                        Some(message) => {
                            info.set(message.to_owned());
                            mode.set(LoginMode::SignIn);
                        }
                        None => crate::util::browser::redirect("/dashboard"),
                    },
                    Err(err) => info.set(api::login_failure_message(&err)),
                },
                LoginSubmission::Forgot(request) => match api::request_password_reset(&request).await {
                    Ok(()) => info.set("Check your inbox for a password reset link.".to_owned()),
                    Err(err) => info.set(api::reset_failure_message(&err)),
                },
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = submission;
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"MedAI"</h1>
                <p class="login-card__subtitle">{move || mode.get().title()}</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <Show when=move || mode.get() != LoginMode::Forgot>
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </Show>
                    <Show when=move || mode.get() == LoginMode::Register>
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Confirm password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                        <p class="login-hint">{protocol::credentials::PASSWORD_POLICY_MESSAGE}</p>
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || mode.get().submit_label()}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <div class="login-links">
                    <Show when=move || mode.get() != LoginMode::SignIn>
                        <button class="login-link" on:click=move |_| switch_mode(LoginMode::SignIn)>
                            "Back to sign in"
                        </button>
                    </Show>
                    <Show when=move || mode.get() == LoginMode::SignIn>
                        <button class="login-link" on:click=move |_| switch_mode(LoginMode::Register)>
                            "Create an account"
                        </button>
                        <button class="login-link" on:click=move |_| switch_mode(LoginMode::Forgot)>
                            "Forgot password?"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
