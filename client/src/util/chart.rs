//! Scatter-plot layout for clustering results.
//!
//! DESIGN
//! ======
//! Pure geometry: data coordinates are mapped into a fixed SVG view box, and
//! each cluster gets a color by its rank among the sorted cluster ids. The
//! same result therefore always renders with the same colors.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use protocol::ClusterSet;

pub const VIEW_WIDTH: f64 = 640.0;
pub const VIEW_HEIGHT: f64 = 360.0;
pub const PADDING: f64 = 28.0;
pub const POINT_RADIUS: f64 = 4.5;

const PALETTE: [&str; 8] = ["#2563eb", "#e11d48", "#059669", "#d97706", "#7c3aed", "#0891b2", "#db2777", "#4b5563"];

#[must_use]
pub fn cluster_color(rank: usize) -> &'static str {
    PALETTE[rank % PALETTE.len()]
}

/// Legend text for a cluster id. DBSCAN reports noise as `-1`.
#[must_use]
pub fn cluster_label(cluster_id: i64) -> String {
    if cluster_id < 0 { "Noise".to_owned() } else { format!("Cluster {cluster_id}") }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotPoint {
    pub cx: f64,
    pub cy: f64,
    /// Tooltip text.
    pub title: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotSeries {
    pub cluster_id: i64,
    pub label: String,
    pub color: &'static str,
    pub points: Vec<PlotPoint>,
}

/// Data range on one axis, widened when every value is equal.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values
            .filter(|value| value.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| (lo.min(value), hi.max(value)));
        if !min.is_finite() {
            return Self { min: -1.0, max: 1.0 };
        }
        if (max - min).abs() < f64::EPSILON {
            return Self { min: min - 1.0, max: max + 1.0 };
        }
        Self { min, max }
    }

    fn fraction(self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }
}

/// One series per cluster, ids ascending.
#[must_use]
pub fn layout(clusters: &ClusterSet) -> Vec<PlotSeries> {
    let x_span = Span::of(clusters.points().iter().map(|point| point.x));
    let y_span = Span::of(clusters.points().iter().map(|point| point.y));
    let plot_width = VIEW_WIDTH - 2.0 * PADDING;
    let plot_height = VIEW_HEIGHT - 2.0 * PADDING;

    clusters
        .groups()
        .into_iter()
        .enumerate()
        .map(|(rank, (cluster_id, points))| PlotSeries {
            cluster_id,
            label: cluster_label(cluster_id),
            color: cluster_color(rank),
            points: points
                .into_iter()
                .filter(|point| point.x.is_finite() && point.y.is_finite())
                .map(|point| PlotPoint {
                    cx: PADDING + x_span.fraction(point.x) * plot_width,
                    cy: VIEW_HEIGHT - PADDING - y_span.fraction(point.y) * plot_height,
                    title: format!("{} · {}", point.sample_id, point.display_label),
                })
                .collect(),
        })
        .collect()
}
