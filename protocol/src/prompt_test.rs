use super::*;
use serde_json::json;

fn context(labels: Option<SampleLabels>) -> AnalysisContext {
    AnalysisContext {
        manifest: json!({ "algorithm": "kmeans", "n_clusters": 2 }),
        clusters: json!({ "points": [{ "x": 1.0, "y": 2.0, "cluster": 0 }] }),
        xai: None,
        labels,
    }
}

#[test]
fn prompt_embeds_pretty_printed_context() {
    let prompt = interpretation_prompt(&context(None));
    assert!(prompt.contains("You are MedAI"));
    assert!(prompt.contains("\"algorithm\": \"kmeans\""));
    assert!(prompt.contains("\"n_clusters\": 2"));
    assert!(prompt.contains("🧠 Explainable AI insights (optional):\nnull"));
}

#[test]
fn prompt_omits_labels_section_without_labels() {
    let prompt = interpretation_prompt(&context(None));
    assert!(!prompt.contains("ground truth"));

    let prompt = interpretation_prompt(&context(Some(SampleLabels::new())));
    assert!(!prompt.contains("ground truth"));
}

#[test]
fn prompt_lists_labels_one_per_line() {
    let mut labels = SampleLabels::new();
    labels.insert("Sample 1".to_owned(), "tumor".to_owned());
    labels.insert("Sample 2".to_owned(), "normal".to_owned());

    let prompt = interpretation_prompt(&context(Some(labels)));
    assert!(prompt.contains("🧾 Original biological labels (ground truth):\n- Sample 1: tumor\n- Sample 2: normal\n"));
}

// =============================================================================
// CHAT CONTEXT
// =============================================================================

#[test]
fn chat_context_prompt_embeds_context_and_waits_for_questions() {
    let prompt = chat_context_prompt(&context(None));
    assert!(prompt.contains("The user will now chat with you"));
    assert!(prompt.contains("🧬 Manifest:\n{\n  \"algorithm\": \"kmeans\""));
    assert!(prompt.contains("🧠 Explainable AI insights:\nnull"));
    assert!(prompt.trim_end().ends_with("Let’s begin."));
    assert!(!prompt.contains("Original biological labels"));
}

#[test]
fn chat_context_prompt_lists_labels_without_ground_truth_suffix() {
    let mut labels = SampleLabels::new();
    labels.insert("Sample 1".to_owned(), "tumor".to_owned());

    let prompt = chat_context_prompt(&context(Some(labels)));
    assert!(prompt.contains("🧾 Original biological labels:\n- Sample 1: tumor\n"));
    assert!(!prompt.contains("ground truth"));
}
