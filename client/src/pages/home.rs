//! Public landing page.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Where "Get started" leads: straight to the dashboard for a known session.
#[must_use]
pub fn get_started_href(state: &AuthState) -> &'static str {
    if state.user.is_some() { "/dashboard" } else { "/login" }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <div class="home-page">
            <header class="home-page__hero">
                <h1>"MedAI"</h1>
                <p class="home-page__tagline">
                    "Cluster gene expression data and let MedAI explain what the groups mean."
                </p>
                <a class="btn btn--primary home-page__cta" href=move || get_started_href(&auth.get())>
                    "Get started"
                </a>
            </header>
            <section class="home-page__features">
                <article>
                    <h2>"Upload"</h2>
                    <p>"CSV, Excel or text expression matrices, one sample per row."</p>
                </article>
                <article>
                    <h2>"Cluster"</h2>
                    <p>"K-Means, agglomerative or DBSCAN, or let MedAI choose."</p>
                </article>
                <article>
                    <h2>"Understand"</h2>
                    <p>"Read an interpretation of every cluster and ask follow-up questions."</p>
                </article>
            </section>
        </div>
    }
}
