//! Saved projects list with search. Selecting a project opens its dialog.

use leptos::prelude::*;

use crate::actions;
use crate::components::project_dialog::ProjectDialogView;
use crate::state::auth::AuthState;
use crate::state::projects::ProjectsState;

#[component]
pub fn ProjectsView() -> impl IntoView {
    let projects = expect_context::<RwSignal<ProjectsState>>();
    let auth = expect_context::<RwSignal<AuthState>>();

    // Refresh on every visit; the list changes whenever an analysis is saved.
    actions::load_projects(projects, auth);
    on_cleanup(move || {
        projects.try_update(ProjectsState::close);
    });

    view! {
        <section class="projects-view">
            <header class="projects-view__header">
                <h2>"Projects"</h2>
                <input
                    class="projects-view__search"
                    type="search"
                    placeholder="Search projects"
                    prop:value=move || projects.get().search
                    on:input=move |ev| projects.update(|p| p.search = event_target_value(&ev))
                />
                <button class="btn" on:click=move |_| actions::load_projects(projects, auth)>
                    "Refresh"
                </button>
            </header>

            <Show when=move || projects.get().error.is_some()>
                <p class="projects-view__error">{move || projects.get().error.unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !projects.get().loading
                fallback=|| view! { <p class="projects-view__loading">"Loading projects..."</p> }
            >
                {move || {
                    let items = projects.get().filtered();
                    if items.is_empty() {
                        return view! { <p class="projects-view__empty">"No projects yet."</p> }.into_any();
                    }
                    view! {
                        <ul class="projects-view__list">
                            {items
                                .into_iter()
                                .map(|project| {
                                    let name = project.name.clone();
                                    let edited = project.last_edited.clone().unwrap_or_default();
                                    view! {
                                        <li>
                                            <button
                                                class="projects-view__item"
                                                on:click=move |_| actions::open_project(projects, auth, name.clone())
                                            >
                                                <span class="projects-view__name">{project.name}</span>
                                                <span class="projects-view__edited">{edited}</span>
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }}
            </Show>

            <ProjectDialogView/>
        </section>
    }
}
