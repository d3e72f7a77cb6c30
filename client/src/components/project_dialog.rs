//! Modal for one saved project: metadata, report download, and deletion.

use leptos::prelude::*;

use crate::actions;
use crate::net::backend::proxy_endpoints;
use crate::state::auth::AuthState;
use crate::state::projects::{ProjectDialog, ProjectsState};

#[component]
pub fn ProjectDialogView() -> impl IntoView {
    let projects = expect_context::<RwSignal<ProjectsState>>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let dialog = move || projects.get().dialog;
    let close = move |_| projects.update(ProjectsState::close);

    view! {
        {move || {
            dialog()
                .map(|d| {
                    let download_href = auth
                        .get_untracked()
                        .owner_id()
                        .filter(|_| d.has_download())
                        .map(|owner| proxy_endpoints().download(owner, &d.name));
                    view! {
                        <div class="modal-backdrop" on:click=close></div>
                        <div class="modal project-dialog" role="dialog" aria-modal="true">
                            <header class="project-dialog__header">
                                <h3>{d.title().to_owned()}</h3>
                                <p class="project-dialog__description">{d.description()}</p>
                            </header>
                            {dialog_body(&d)}
                            {d.error.clone().map(|error| view! { <p class="project-dialog__error">{error}</p> })}
                            <footer class="project-dialog__actions">
                                {download_href
                                    .map(|href| {
                                        view! {
                                            <a class="btn btn--primary" href=href download="">
                                                "Download report"
                                            </a>
                                        }
                                    })}
                                {delete_controls(&d, projects, auth)}
                                <button class="btn" on:click=close>
                                    "Close"
                                </button>
                            </footer>
                        </div>
                    }
                })
        }}
    }
}

fn dialog_body(dialog: &ProjectDialog) -> AnyView {
    if dialog.loading {
        return view! { <p class="project-dialog__loading">"Loading project info..."</p> }.into_any();
    }
    let summary = dialog.summary();
    let row = |label: &'static str, value: Option<String>| {
        view! {
            <div class="project-dialog__row">
                <dt>{label}</dt>
                <dd>{value.unwrap_or_else(|| "—".to_owned())}</dd>
            </div>
        }
    };
    view! {
        <dl class="project-dialog__meta">
            {row("Algorithm", summary.algorithm)}
            {row("Clusters", summary.n_clusters.map(|n| n.to_string()))}
            {row("Created", summary.created_at)}
        </dl>
    }
        .into_any()
}

fn delete_controls(dialog: &ProjectDialog, projects: RwSignal<ProjectsState>, auth: RwSignal<AuthState>) -> AnyView {
    if dialog.deleting {
        return view! { <span class="project-dialog__deleting">"Deleting..."</span> }.into_any();
    }
    if dialog.confirm_delete {
        return view! {
            <span class="project-dialog__confirm">
                "Delete this project permanently?"
                <button class="btn btn--danger" on:click=move |_| actions::delete_project(projects, auth)>
                    "Delete"
                </button>
                <button class="btn" on:click=move |_| projects.update(ProjectsState::cancel_delete)>
                    "Cancel"
                </button>
            </span>
        }
            .into_any();
    }
    view! {
        <button class="btn btn--danger" on:click=move |_| projects.update(ProjectsState::request_delete)>
            "Delete project"
        </button>
    }
        .into_any()
}
