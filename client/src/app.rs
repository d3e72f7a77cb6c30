//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{dashboard::DashboardPage, home::HomePage, login::LoginPage, reset_password::ResetPasswordPage};
use crate::state::{
    analysis_form::AnalysisFormState, auth::AuthState, projects::ProjectsState, ui::UiState,
    workbench::WorkbenchSignal,
};
use crate::util::auth::load_session;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);
    provide_context(WorkbenchSignal::new());
    provide_context(RwSignal::new(UiState::default()));
    provide_context(RwSignal::new(ProjectsState::default()));
    provide_context(RwSignal::new(AnalysisFormState::default()));

    load_session(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/medai.css"/>
        <Title text="MedAI"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
