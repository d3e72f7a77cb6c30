//! Prompt templates for the interpretation and chat endpoints.
//!
//! The backend is a plain completion endpoint, so the whole analysis context
//! is rendered into one natural-language prompt. JSON sections use two-space
//! pretty printing.

#[cfg(test)]
#[path = "prompt_test.rs"]
mod prompt_test;

use serde_json::Value;

use crate::types::{AnalysisContext, SampleLabels};

/// Build the `/interpret` prompt for an analysis context.
#[must_use]
pub fn interpretation_prompt(context: &AnalysisContext) -> String {
    let manifest = pretty(&context.manifest);
    let clusters = pretty(&context.clusters);
    let xai = context.xai.as_ref().map_or_else(|| "null".to_owned(), pretty);
    let labels = labels_section(context.labels.as_ref(), "Original biological labels (ground truth)");

    format!(
        "
You are MedAI, an expert biomedical assistant specialized in bioinformatics and omics data analysis.

Below is the summary of a gene expression clustering analysis from a microarray dataset. Please provide a clear and comprehensive interpretation of the results, including insights into possible biological meaning, data quality, and experimental implications.

---

🧬 Manifest (summary of the experiment):
{manifest}

🧪 Clustering results:
{clusters}

🧠 Explainable AI insights (optional):
{xai}
{labels}

---

Please explain:
1. The main structure of the clusters.
2. How they relate to the biological experiment.
3. Any pattern or anomaly you can detect.
4. Suggestions for follow-up analysis or validation.

Respond in clear scientific English for a researcher audience.
"
    )
}

/// Standing context for a chat session about one analysis. Unlike the
/// interpretation prompt it asks for nothing yet; the user's questions follow.
#[must_use]
pub fn chat_context_prompt(context: &AnalysisContext) -> String {
    let manifest = pretty(&context.manifest);
    let clusters = pretty(&context.clusters);
    let xai = context.xai.as_ref().map_or_else(|| "null".to_owned(), pretty);
    let labels = labels_section(context.labels.as_ref(), "Original biological labels");

    format!(
        "
You are MedAI, a biomedical assistant specialized in gene expression data and clustering analysis. The user will now chat with you about the results of a clustering process.

Here is the context of the analysis, which you should keep in mind for the entire conversation:

---

🧬 Manifest:
{manifest}

🧪 Clusters:
{clusters}

🧠 Explainable AI insights:
{xai}
{labels}

---

The user will now ask you specific questions about these results. Reply in a clear, professional, and accessible way. When unsure, ask clarifying questions. Use markdown formatting where helpful.

Let’s begin.
"
    )
}

/// Ground-truth section; empty when there are no labels.
fn labels_section(labels: Option<&SampleLabels>, heading: &str) -> String {
    let Some(labels) = labels.filter(|labels| !labels.is_empty()) else {
        return String::new();
    };
    let lines: Vec<String> = labels.iter().map(|(sample, group)| format!("- {sample}: {group}")).collect();
    format!("\n🧾 {heading}:\n{}\n", lines.join("\n"))
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
