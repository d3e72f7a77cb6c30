//! Request encoding and response decoding for the MedAI backend.
//!
//! DESIGN
//! ======
//! Transports (gloo-net in the browser, reqwest in the CLI and proxy) only move
//! bytes. Everything about the wire shape lives here so each transport builds
//! identical requests and classifies responses identically:
//! - `check_status` maps a non-success status to `ApiError::Network`
//!   (`ApiError::Auth` for 401).
//! - `decode_*` map a success body to a typed value or `ApiError::Server`.
//!   A decoder either returns a complete value or an error, never a partial one.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::prompt::interpretation_prompt;
use crate::types::{
    AnalysisContext, AnalysisRequest, AnalysisResult, ChatMessage, ChatRole, ClusterPoint, ClusterSet, MISSING_LABEL,
    Project, ProjectInfo, SampleLabels,
};

pub const FIELD_FILE: &str = "file";
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_PROJECT_NAME: &str = "project_name";
pub const FIELD_ALGORITHM: &str = "algorithm";
pub const FIELD_PARAMS: &str = "params";
pub const FIELD_MARKDOWN: &str = "markdown_response";

/// Metadata keys preferred when summarizing a sample without a label.
const PREFERRED_METADATA_FIELDS: [&str; 5] = ["characteristics_ch1", "disease", "age", "gender", "source_name_ch1"];

const ERROR_BODY_SNIPPET_CHARS: usize = 200;

// =============================================================================
// REQUESTS
// =============================================================================

/// Value of one multipart form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File { file_name: String, content_type: &'static str, bytes: Arc<[u8]> },
}

/// Named multipart field, in submission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub value: FormValue,
}

impl FormField {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self { name, value: FormValue::Text(value.into()) }
    }
}

/// Multipart fields for `POST /clustering/clustering`.
#[must_use]
pub fn analysis_form(request: &AnalysisRequest) -> Vec<FormField> {
    let dataset = request.dataset();
    vec![
        FormField {
            name: FIELD_FILE,
            value: FormValue::File {
                file_name: dataset.name().to_owned(),
                content_type: dataset.content_type(),
                bytes: dataset.shared_bytes(),
            },
        },
        FormField::text(FIELD_USER_ID, request.owner_id()),
        FormField::text(FIELD_PROJECT_NAME, request.project_name()),
        FormField::text(FIELD_ALGORITHM, request.algorithm().as_str()),
        FormField::text(FIELD_PARAMS, request.params().to_json().to_string()),
    ]
}

/// Multipart fields for `POST /upload_medai`.
#[must_use]
pub fn report_form(user_id: &str, markdown: &str) -> Vec<FormField> {
    vec![FormField::text(FIELD_USER_ID, user_id), FormField::text(FIELD_MARKDOWN, markdown)]
}

/// JSON body of `POST /interpret`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretBody {
    pub prompt: String,
}

#[must_use]
pub fn interpret_body(context: &AnalysisContext) -> InterpretBody {
    InterpretBody { prompt: interpretation_prompt(context) }
}

/// Chat history entry as sent on the wire (ids stay client-side).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// JSON body of `POST /chat`: full history plus the analysis context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatBody {
    pub messages: Vec<WireChatMessage>,
    pub manifest: Value,
    pub clusters: Value,
    pub xai: Option<Value>,
    pub labels: Option<SampleLabels>,
}

#[must_use]
pub fn chat_body(history: &[ChatMessage], context: &AnalysisContext) -> ChatBody {
    ChatBody {
        messages: history
            .iter()
            .map(|message| WireChatMessage { role: message.role, content: message.content.clone() })
            .collect(),
        manifest: context.manifest.clone(),
        clusters: context.clusters.clone(),
        xai: context.xai.clone(),
        labels: context.labels.clone(),
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Classify an HTTP status.
///
/// # Errors
///
/// [`ApiError::Auth`] for 401, [`ApiError::Network`] for any other status
/// outside `200..=299`, carrying the status and a snippet of the body.
pub fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Auth),
        _ => {
            let snippet: String = body.trim().chars().take(ERROR_BODY_SNIPPET_CHARS).collect();
            if snippet.is_empty() {
                Err(ApiError::Network(format!("status {status}")))
            } else {
                Err(ApiError::Network(format!("status {status}: {snippet}")))
            }
        }
    }
}

/// Decode the `frontend_data` envelope of a clustering response.
///
/// `clusters` (with a `points` array) and `manifest` are required; `xai` and
/// `labels` may be absent or null.
///
/// # Errors
///
/// [`ApiError::Server`] when any required part is missing or malformed.
pub fn decode_analysis(body: &str) -> Result<AnalysisResult, ApiError> {
    let root = parse_json(body)?;
    let data = root
        .get("frontend_data")
        .filter(|value| value.is_object())
        .ok_or_else(|| missing("frontend_data"))?;

    let raw_clusters = data
        .get("clusters")
        .filter(|value| value.is_object())
        .cloned()
        .ok_or_else(|| missing("frontend_data.clusters"))?;
    let manifest = data
        .get("manifest")
        .filter(|value| value.is_object())
        .cloned()
        .ok_or_else(|| missing("frontend_data.manifest"))?;
    let explainability = data.get("xai").filter(|value| !value.is_null()).cloned();
    let sample_labels = decode_labels(data.get("labels"))?;
    let clusters = decode_points(&raw_clusters, sample_labels.as_ref())?;

    Ok(AnalysisResult { clusters, raw_clusters, manifest, explainability, sample_labels })
}

/// # Errors
///
/// [`ApiError::Server`] when `interpretation` is missing or not a string.
pub fn decode_interpretation(body: &str) -> Result<String, ApiError> {
    let root = parse_json(body)?;
    root.get("interpretation")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| missing("interpretation"))
}

/// Decode a chat reply into a new assistant message.
///
/// # Errors
///
/// [`ApiError::Server`] when `content` is missing or not a string.
pub fn decode_chat_reply(body: &str) -> Result<ChatMessage, ApiError> {
    let root = parse_json(body)?;
    root.get("content")
        .and_then(Value::as_str)
        .map(ChatMessage::assistant)
        .ok_or_else(|| missing("content"))
}

/// # Errors
///
/// [`ApiError::Server`] when `projects` is missing or any entry is malformed.
pub fn decode_projects(body: &str) -> Result<Vec<Project>, ApiError> {
    let root = parse_json(body)?;
    let projects = root.get("projects").filter(|value| value.is_array()).ok_or_else(|| missing("projects"))?;
    Vec::<Project>::deserialize(projects).map_err(|e| ApiError::Server(format!("malformed project entry: {e}")))
}

/// Decode project info, defaulting the name to the one requested.
///
/// # Errors
///
/// [`ApiError::Server`] when the body is not a JSON object of the expected shape.
pub fn decode_project_info(body: &str, project_name: &str) -> Result<ProjectInfo, ApiError> {
    let root = parse_json(body)?;
    if !root.is_object() {
        return Err(ApiError::Server("project info is not an object".to_owned()));
    }
    let mut info =
        ProjectInfo::deserialize(&root).map_err(|e| ApiError::Server(format!("malformed project info: {e}")))?;
    if info.name.is_empty() {
        project_name.clone_into(&mut info.name);
    }
    Ok(info)
}

fn parse_json(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Server(format!("invalid JSON: {e}")))
}

fn missing(field: &str) -> ApiError {
    ApiError::Server(format!("missing `{field}` in response"))
}

fn decode_labels(raw: Option<&Value>) -> Result<Option<SampleLabels>, ApiError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => {
            Ok(Some(map.iter().map(|(sample, group)| (sample.clone(), value_text(group))).collect()))
        }
        Some(_) => Err(ApiError::Server("`labels` is not an object".to_owned())),
    }
}

#[derive(Deserialize)]
struct RawPoint {
    x: f64,
    y: f64,
    cluster: i64,
    #[serde(default)]
    sample_id: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

fn decode_points(raw: &Value, labels: Option<&SampleLabels>) -> Result<ClusterSet, ApiError> {
    let points = raw
        .get("points")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("frontend_data.clusters.points"))?;

    let mut out = Vec::with_capacity(points.len());
    for (index, point) in points.iter().enumerate() {
        let raw = RawPoint::deserialize(point).map_err(|e| ApiError::Server(format!("malformed point {index}: {e}")))?;
        out.push(build_point(index, raw, labels));
    }
    Ok(ClusterSet::new(out))
}

/// Sample ids prefer the backend value and fall back to `Sample {n}`; labels
/// prefer the ground-truth map, then the backend label, then point metadata.
fn build_point(index: usize, raw: RawPoint, labels: Option<&SampleLabels>) -> ClusterPoint {
    let sample_id = raw
        .sample_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("Sample {}", index + 1));

    let display_label = labels
        .and_then(|labels| labels.get(&sample_id))
        .cloned()
        .or_else(|| raw.label.filter(|label| !label.trim().is_empty()))
        .or_else(|| raw.metadata.as_ref().and_then(metadata_label))
        .unwrap_or_else(|| MISSING_LABEL.to_owned());

    ClusterPoint { x: raw.x, y: raw.y, cluster_id: raw.cluster, sample_id, display_label }
}

/// Summarize sample metadata as `field: value | field: value`.
fn metadata_label(metadata: &Map<String, Value>) -> Option<String> {
    let present = |field: &&str| metadata.get(*field).is_some_and(is_truthy);
    let preferred: Vec<&str> = PREFERRED_METADATA_FIELDS.iter().copied().filter(present).collect();
    let fields: Vec<&str> = if preferred.is_empty() {
        metadata.keys().take(3).map(String::as_str).collect()
    } else {
        preferred
    };

    let summary = fields
        .iter()
        .filter_map(|field| metadata.get(*field).map(|value| format!("{field}: {}", value_text(value))))
        .collect::<Vec<_>>()
        .join(" | ");
    (!summary.is_empty()).then_some(summary)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
