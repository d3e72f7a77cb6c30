//! Product walkthrough video.

use leptos::prelude::*;

pub const TOUR_VIDEO_URL: &str = "https://www.youtube.com/embed/qh3NGpYRG3I";

#[component]
pub fn TourView() -> impl IntoView {
    view! {
        <section class="tour-view">
            <h2>"Take a tour"</h2>
            <p>"A short walkthrough of uploading a dataset, clustering it, and asking MedAI about the result."</p>
            <div class="tour-view__frame">
                <iframe
                    src=TOUR_VIDEO_URL
                    title="MedAI tour"
                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                    allowfullscreen=true
                ></iframe>
            </div>
        </section>
    }
}
