//! Results area: placeholder, loading skeleton, chart, or failure banner.

use leptos::prelude::*;
use workflow::{AnalysisStatus, Workbench, WorkbenchCell};

use crate::components::cluster_chart::ClusterChart;
use crate::components::failure_banner::FailureBanner;
use crate::state::workbench::WorkbenchSignal;

#[component]
pub fn ResultsPanel() -> impl IntoView {
    let workbench = expect_context::<WorkbenchSignal>();

    let status = move || workbench.with(|w| w.analysis().status());

    view! {
        <section class="results-panel">
            <header class="results-panel__header">
                <h2>"Results"</h2>
                <Show when=move || status() == AnalysisStatus::Ready>
                    <button
                        class="btn results-panel__clear"
                        on:click=move |_| {
                            workbench.update(Workbench::clear_results);
                        }
                    >
                        "Clear"
                    </button>
                </Show>
            </header>
            {move || match status() {
                AnalysisStatus::Idle => {
                    view! {
                        <p class="results-panel__placeholder">
                            "Upload a dataset and run an analysis to see its clusters here."
                        </p>
                    }
                        .into_any()
                }
                AnalysisStatus::Submitting => {
                    view! {
                        <div class="results-panel__skeleton" aria-busy="true">
                            <div class="skeleton skeleton--chart"></div>
                            <div class="skeleton skeleton--line"></div>
                        </div>
                    }
                        .into_any()
                }
                AnalysisStatus::Failed => view! { <FailureBanner/> }.into_any(),
                AnalysisStatus::Ready => {
                    let Some(result) = workbench.with_untracked(|w| w.analysis().result()) else {
                        return ().into_any();
                    };
                    let summary = result.summary();
                    let algorithm = summary.algorithm.unwrap_or_else(|| "unknown".to_owned());
                    let clusters = summary
                        .n_clusters
                        .map_or_else(|| result.clusters.distinct_clusters().to_string(), |n| n.to_string());
                    view! {
                        <p class="results-panel__summary">
                            {format!("{} samples · {clusters} clusters · {algorithm}", result.clusters.len())}
                        </p>
                        <ClusterChart clusters=result.clusters.clone()/>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
