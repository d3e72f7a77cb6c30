//! Analysis settings wizard: algorithm, parameters, then project and dataset.

use leptos::prelude::*;
use protocol::{
    Algorithm, AlgorithmParams, CLUSTER_COUNT_MAX, CLUSTER_COUNT_MIN, EPSILON_MAX, EPSILON_MIN, EPSILON_STEP, Linkage,
    MAX_ITERATIONS_MAX, MAX_ITERATIONS_MIN, MAX_ITERATIONS_STEP,
};

use crate::actions;
use crate::state::analysis_form::{AnalysisFormState, WizardStep, parse_f64_input, parse_u32_input};
use crate::state::auth::AuthState;
use crate::state::workbench::WorkbenchSignal;
use crate::util::browser::read_picked_file;

pub const ACCEPTED_FILE_TYPES: &str = ".csv,.xls,.xlsx,.txt";

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let form = expect_context::<RwSignal<AnalysisFormState>>();
    let workbench = expect_context::<WorkbenchSignal>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let step = move || form.get().step;
    let submitting = move || workbench.with(|w| w.analysis().is_loading());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if form.get_untracked().is_last_step() {
            actions::start_analysis(workbench, auth, form);
        } else {
            form.update(AnalysisFormState::next);
        }
    };

    view! {
        <form class="settings-panel" on:submit=on_submit>
            <header class="settings-panel__header">
                <h2>"Analysis settings"</h2>
                <span class="settings-panel__progress">
                    {move || {
                        let (current, total) = form.get().progress();
                        format!("Step {current} of {total}")
                    }}
                </span>
            </header>

            {move || match step() {
                WizardStep::Algorithm => view! { <AlgorithmStep/> }.into_any(),
                WizardStep::Parameters => view! { <ParametersStep/> }.into_any(),
                WizardStep::Project => view! { <ProjectStep/> }.into_any(),
            }}

            <Show when=move || form.get().message.is_some()>
                <p class="settings-panel__message" role="alert">
                    {move || form.get().message.unwrap_or_default()}
                </p>
            </Show>

            <div class="settings-panel__nav">
                <Show when=move || step() != WizardStep::Algorithm>
                    <button class="btn" type="button" on:click=move |_| form.update(AnalysisFormState::back)>
                        "Back"
                    </button>
                </Show>
                <button class="btn btn--primary" type="submit" disabled=move || submitting() && form.get().is_last_step()>
                    {move || {
                        if !form.get().is_last_step() {
                            "Next"
                        } else if submitting() {
                            "Analyzing..."
                        } else {
                            "Run analysis"
                        }
                    }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn AlgorithmStep() -> impl IntoView {
    let form = expect_context::<RwSignal<AnalysisFormState>>();

    view! {
        <fieldset class="settings-panel__step">
            <legend>"Clustering algorithm"</legend>
            {Algorithm::ALL
                .into_iter()
                .map(|algorithm| {
                    view! {
                        <label class="settings-panel__choice">
                            <input
                                type="radio"
                                name="algorithm"
                                prop:checked=move || form.get().algorithm() == algorithm
                                on:change=move |_| form.update(|f| f.select_algorithm(algorithm))
                            />
                            {algorithm.label()}
                        </label>
                    }
                })
                .collect_view()}
        </fieldset>
    }
}

#[component]
fn ParametersStep() -> impl IntoView {
    let form = expect_context::<RwSignal<AnalysisFormState>>();
    // Re-render the controls only when the algorithm changes, not on every
    // slider tick.
    let algorithm = Memo::new(move |_| form.get().algorithm());
    let params = move || form.get().draft.params;

    let cluster_count = move || match params() {
        AlgorithmParams::Kmeans { cluster_count, .. } => cluster_count,
        _ => CLUSTER_COUNT_MIN,
    };
    let max_iterations = move || match params() {
        AlgorithmParams::Kmeans { max_iterations, .. } => max_iterations,
        _ => MAX_ITERATIONS_MIN,
    };
    let linkage = move || match params() {
        AlgorithmParams::Agglomerative { linkage } => linkage,
        _ => Linkage::default(),
    };
    let epsilon = move || match params() {
        AlgorithmParams::Dbscan { epsilon, .. } => epsilon,
        _ => EPSILON_MIN,
    };
    let min_samples = move || match params() {
        AlgorithmParams::Dbscan { min_samples, .. } => min_samples,
        _ => 1,
    };

    view! {
        <fieldset class="settings-panel__step">
            <legend>"Parameters"</legend>
            {move || match algorithm.get() {
                Algorithm::Kmeans => {
                    view! {
                        <label class="settings-panel__field">
                            {move || format!("Number of clusters: {}", cluster_count())}
                            <input
                                type="range"
                                min=CLUSTER_COUNT_MIN.to_string()
                                max=CLUSTER_COUNT_MAX.to_string()
                                step="1"
                                prop:value=move || cluster_count().to_string()
                                on:input=move |ev| {
                                    if let Some(value) = parse_u32_input(&event_target_value(&ev)) {
                                        form.update(|f| f.set_cluster_count(value));
                                    }
                                }
                            />
                        </label>
                        <label class="settings-panel__field">
                            {move || format!("Max iterations: {}", max_iterations())}
                            <input
                                type="range"
                                min=MAX_ITERATIONS_MIN.to_string()
                                max=MAX_ITERATIONS_MAX.to_string()
                                step=MAX_ITERATIONS_STEP.to_string()
                                prop:value=move || max_iterations().to_string()
                                on:input=move |ev| {
                                    if let Some(value) = parse_u32_input(&event_target_value(&ev)) {
                                        form.update(|f| f.set_max_iterations(value));
                                    }
                                }
                            />
                        </label>
                    }
                        .into_any()
                }
                Algorithm::Agglomerative => {
                    view! {
                        <label class="settings-panel__field">
                            "Linkage"
                            <select
                                prop:value=move || linkage().as_str()
                                on:change=move |ev| {
                                    if let Ok(value) = event_target_value(&ev).parse::<Linkage>() {
                                        form.update(|f| f.set_linkage(value));
                                    }
                                }
                            >
                                {Linkage::ALL
                                    .into_iter()
                                    .map(|option| view! { <option value=option.as_str()>{option.as_str()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                    }
                        .into_any()
                }
                Algorithm::Dbscan => {
                    view! {
                        <label class="settings-panel__field">
                            {move || format!("Epsilon: {:.1}", epsilon())}
                            <input
                                type="range"
                                min=EPSILON_MIN.to_string()
                                max=EPSILON_MAX.to_string()
                                step=EPSILON_STEP.to_string()
                                prop:value=move || epsilon().to_string()
                                on:input=move |ev| {
                                    if let Some(value) = parse_f64_input(&event_target_value(&ev)) {
                                        form.update(|f| f.set_epsilon(value));
                                    }
                                }
                            />
                        </label>
                        <label class="settings-panel__field">
                            "Min samples"
                            <input
                                type="number"
                                min="1"
                                prop:value=move || min_samples().to_string()
                                on:input=move |ev| {
                                    if let Some(value) = parse_u32_input(&event_target_value(&ev)) {
                                        form.update(|f| f.set_min_samples(value));
                                    }
                                }
                            />
                        </label>
                    }
                        .into_any()
                }
                Algorithm::Auto => view! { <p>"MedAI picks the algorithm and its settings."</p> }.into_any(),
            }}
        </fieldset>
    }
}

#[component]
fn ProjectStep() -> impl IntoView {
    let form = expect_context::<RwSignal<AnalysisFormState>>();

    let on_file = move |ev: leptos::ev::Event| {
        read_picked_file(&ev, move |dataset| form.update(|f| f.set_dataset(dataset)));
    };

    view! {
        <fieldset class="settings-panel__step">
            <legend>"Project and dataset"</legend>
            <label class="settings-panel__field">
                "Project name"
                <input
                    type="text"
                    placeholder="e.g. tumour-subtypes"
                    prop:value=move || form.get().draft.project_name
                    on:input=move |ev| form.update(|f| f.set_project_name(event_target_value(&ev)))
                />
            </label>
            <label class="settings-panel__field">
                "Gene expression file"
                <input type="file" accept=ACCEPTED_FILE_TYPES on:change=on_file/>
            </label>
            <p class="settings-panel__file">
                {move || {
                    form.get()
                        .dataset_name()
                        .map_or_else(|| "No file selected.".to_owned(), |name| format!("Selected: {name}"))
                }}
            </p>
        </fieldset>
    }
}
