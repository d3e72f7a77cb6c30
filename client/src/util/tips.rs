//! Rotating tips shown above the dashboard.

#[cfg(test)]
#[path = "tips_test.rs"]
mod tips_test;

/// Seconds between tip changes.
pub const TIP_INTERVAL_SECS: u64 = 10;

pub const TIPS: [&str; 5] = [
    "Clustering helps group similar data. Think of it like organizing patient records into understandable groups.",
    "A good clustering algorithm turns complex data into clear patterns, simplifying decision-making.",
    "Remember, the goal is to reveal hidden structures in your data, not just to crunch numbers.",
    "Sometimes simple algorithms work best. Start basic and then fine-tune for clearer insights.",
    "Experiment with different settings to find the clustering that best fits your dataset.",
];

#[must_use]
pub fn tip_at(tick: usize) -> &'static str {
    TIPS[tick % TIPS.len()]
}
