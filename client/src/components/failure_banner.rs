//! Error banner for a failed analysis with Retry and Dismiss.

use leptos::prelude::*;

use crate::actions;
use crate::state::workbench::WorkbenchSignal;
use workflow::{Workbench, WorkbenchCell};

#[component]
pub fn FailureBanner() -> impl IntoView {
    let workbench = expect_context::<WorkbenchSignal>();

    let message = move || workbench.with(|w| w.analysis().error().map(protocol::ApiError::user_message));
    let can_retry = move || workbench.with(|w| w.analysis().can_retry());

    view! {
        <Show when=move || message().is_some()>
            <div class="failure-banner" role="alert">
                <p class="failure-banner__text">{move || message().unwrap_or_default()}</p>
                <div class="failure-banner__actions">
                    <Show when=can_retry>
                        <button class="btn btn--primary" on:click=move |_| actions::retry_analysis(workbench)>
                            "Retry"
                        </button>
                    </Show>
                    <button
                        class="btn"
                        on:click=move |_| {
                            workbench.update(Workbench::dismiss_failure);
                        }
                    >
                        "Dismiss"
                    </button>
                </div>
            </div>
        </Show>
    }
}
