//! Scatter plot of the clustered samples, one colored series per cluster.

use leptos::prelude::*;
use protocol::ClusterSet;

use crate::util::chart::{POINT_RADIUS, PlotSeries, VIEW_HEIGHT, VIEW_WIDTH, layout};

#[component]
pub fn ClusterChart(clusters: ClusterSet) -> impl IntoView {
    let series = layout(&clusters);
    let view_box = format!("0 0 {VIEW_WIDTH} {VIEW_HEIGHT}");
    let legend = series.clone();

    view! {
        <figure class="cluster-chart">
            <svg class="cluster-chart__plot" viewBox=view_box role="img" aria-label="Cluster scatter plot">
                {series.into_iter().map(render_series).collect_view()}
            </svg>
            <figcaption class="cluster-chart__legend">
                {legend
                    .into_iter()
                    .map(|s| {
                        view! {
                            <span class="cluster-chart__key">
                                <span class="cluster-chart__swatch" style:background-color=s.color></span>
                                {format!("{} ({})", s.label, s.points.len())}
                            </span>
                        }
                    })
                    .collect_view()}
            </figcaption>
        </figure>
    }
}

fn render_series(series: PlotSeries) -> impl IntoView {
    let color = series.color;
    view! {
        <g class="cluster-chart__series" data-cluster=series.cluster_id.to_string()>
            {series
                .points
                .into_iter()
                .map(|point| {
                    view! {
                        <circle
                            cx=format!("{:.2}", point.cx)
                            cy=format!("{:.2}", point.cy)
                            r=POINT_RADIUS.to_string()
                            fill=color
                        >
                            <title>{point.title}</title>
                        </circle>
                    }
                })
                .collect_view()}
        </g>
    }
}
