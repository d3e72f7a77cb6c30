//! Domain types exchanged with the MedAI backend.
//!
//! DESIGN
//! ======
//! Inputs (`AnalysisRequest`, `AlgorithmParams`) are validated at construction
//! so a value that exists is always sendable. Outputs keep the typed view the
//! UI renders (`ClusterSet`) next to the raw backend payload, because chat and
//! interpretation calls must replay the context exactly as it was received.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};

use crate::error::ApiError;

// =============================================================================
// ALGORITHMS
// =============================================================================

pub const CLUSTER_COUNT_MIN: u32 = 2;
pub const CLUSTER_COUNT_MAX: u32 = 20;
pub const DEFAULT_CLUSTER_COUNT: u32 = 3;
pub const MAX_ITERATIONS_MIN: u32 = 100;
pub const MAX_ITERATIONS_MAX: u32 = 1000;
pub const MAX_ITERATIONS_STEP: u32 = 50;
pub const DEFAULT_MAX_ITERATIONS: u32 = 300;
pub const EPSILON_MIN: f64 = 0.1;
pub const EPSILON_MAX: f64 = 10.0;
pub const EPSILON_STEP: f64 = 0.1;
pub const DEFAULT_EPSILON: f64 = 0.5;
pub const DEFAULT_MIN_SAMPLES: u32 = 5;

/// Clustering algorithm understood by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Backend picks the algorithm and its parameters.
    #[default]
    Auto,
    Kmeans,
    Agglomerative,
    Dbscan,
}

impl Algorithm {
    pub const ALL: [Self; 4] = [Self::Auto, Self::Kmeans, Self::Agglomerative, Self::Dbscan];

    /// Wire name sent in the `algorithm` form field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Kmeans => "kmeans",
            Self::Agglomerative => "agglomerative",
            Self::Dbscan => "dbscan",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "Automatic",
            Self::Kmeans => "K-Means",
            Self::Agglomerative => "Agglomerative",
            Self::Dbscan => "DBSCAN",
        }
    }

    /// Whether the algorithm exposes tunable parameters.
    #[must_use]
    pub fn has_params(self) -> bool {
        !matches!(self, Self::Auto)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == normalized)
            .ok_or_else(|| ApiError::validation(format!("unknown algorithm: {raw}")))
    }
}

/// Linkage criterion for agglomerative clustering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    #[default]
    Single,
    Complete,
    Average,
}

impl Linkage {
    pub const ALL: [Self; 3] = [Self::Single, Self::Complete, Self::Average];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Complete => "complete",
            Self::Average => "average",
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Linkage {
    type Err = ApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|linkage| linkage.as_str() == normalized)
            .ok_or_else(|| ApiError::validation(format!("unknown linkage: {raw}")))
    }
}

/// Algorithm together with its parameters.
///
/// Each variant carries exactly the fields its algorithm accepts, so a
/// parameter record can never be paired with the wrong algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AlgorithmParams {
    #[default]
    Auto,
    Kmeans { cluster_count: u32, max_iterations: u32 },
    Agglomerative { linkage: Linkage },
    Dbscan { epsilon: f64, min_samples: u32 },
}

impl AlgorithmParams {
    /// Default parameters shown when `algorithm` is first selected.
    #[must_use]
    pub fn defaults_for(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Auto => Self::Auto,
            Algorithm::Kmeans => Self::Kmeans {
                cluster_count: DEFAULT_CLUSTER_COUNT,
                max_iterations: DEFAULT_MAX_ITERATIONS,
            },
            Algorithm::Agglomerative => Self::Agglomerative { linkage: Linkage::default() },
            Algorithm::Dbscan => Self::Dbscan { epsilon: DEFAULT_EPSILON, min_samples: DEFAULT_MIN_SAMPLES },
        }
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Auto => Algorithm::Auto,
            Self::Kmeans { .. } => Algorithm::Kmeans,
            Self::Agglomerative { .. } => Algorithm::Agglomerative,
            Self::Dbscan { .. } => Algorithm::Dbscan,
        }
    }

    /// JSON record sent (stringified) in the `params` form field.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match *self {
            Self::Auto => json!({}),
            Self::Kmeans { cluster_count, max_iterations } => {
                json!({ "clusterCount": cluster_count, "maxIterations": max_iterations })
            }
            Self::Agglomerative { linkage } => json!({ "linkage": linkage.as_str() }),
            Self::Dbscan { epsilon, min_samples } => json!({ "epsilon": epsilon, "minSamples": min_samples }),
        }
    }

    /// Reject parameter values the backend cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the offending parameter.
    pub fn validate(&self) -> Result<(), ApiError> {
        match *self {
            Self::Auto | Self::Agglomerative { .. } => Ok(()),
            Self::Kmeans { cluster_count, max_iterations } => {
                if cluster_count < CLUSTER_COUNT_MIN {
                    return Err(ApiError::validation(format!(
                        "Number of clusters must be at least {CLUSTER_COUNT_MIN}."
                    )));
                }
                if max_iterations == 0 {
                    return Err(ApiError::validation("Max iterations must be positive."));
                }
                Ok(())
            }
            Self::Dbscan { epsilon, min_samples } => {
                if !epsilon.is_finite() || epsilon <= 0.0 {
                    return Err(ApiError::validation("Epsilon must be a positive number."));
                }
                if min_samples == 0 {
                    return Err(ApiError::validation("Min samples must be at least 1."));
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// DATASET + REQUEST
// =============================================================================

/// File extensions the backend can ingest.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["csv", "xls", "xlsx", "txt"];

/// A dataset selected for upload. Bytes are shared so a retained request can
/// be resubmitted without copying the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl DatasetFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { name: name.into(), bytes: bytes.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercased extension after the last `.`, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
    }

    /// MIME type attached to the multipart `file` part.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("csv") => "text/csv",
            Some("txt") => "text/plain",
            Some("xls") => "application/vnd.ms-excel",
            Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            _ => "application/octet-stream",
        }
    }
}

/// A fully validated clustering submission. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisRequest {
    dataset: DatasetFile,
    owner_id: String,
    project_name: String,
    params: AlgorithmParams,
}

impl AnalysisRequest {
    /// Validate inputs and build a request.
    ///
    /// Local input problems are reported before identity problems, so a form
    /// with a missing file says so even when the session has lapsed.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] when the dataset is missing, empty, or of an
    ///   unsupported type, the project name is blank, or `params` is invalid.
    /// - [`ApiError::Auth`] when no owner identity is available.
    pub fn new(
        dataset: Option<DatasetFile>,
        owner_id: Option<&str>,
        project_name: &str,
        params: AlgorithmParams,
    ) -> Result<Self, ApiError> {
        let Some(dataset) = dataset else {
            return Err(ApiError::validation("Select a dataset file first."));
        };
        if dataset.is_empty() {
            return Err(ApiError::validation("The selected file is empty."));
        }
        if !dataset.is_supported() {
            return Err(ApiError::validation(format!(
                "Unsupported file type. Use one of: {}.",
                ACCEPTED_EXTENSIONS.map(|ext| format!(".{ext}")).join(", ")
            )));
        }
        let project_name = project_name.trim();
        if project_name.is_empty() {
            return Err(ApiError::validation("Enter a project name."));
        }
        params.validate()?;

        let owner_id = owner_id.map(str::trim).filter(|id| !id.is_empty()).ok_or(ApiError::Auth)?;

        Ok(Self {
            dataset,
            owner_id: owner_id.to_owned(),
            project_name: project_name.to_owned(),
            params,
        })
    }

    #[must_use]
    pub fn dataset(&self) -> &DatasetFile {
        &self.dataset
    }

    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    #[must_use]
    pub fn params(&self) -> AlgorithmParams {
        self.params
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.params.algorithm()
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// Label shown for a sample with no known ground-truth group.
pub const MISSING_LABEL: &str = "—";

/// One sample projected into the 2-D chart space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterPoint {
    pub x: f64,
    pub y: f64,
    pub cluster_id: i64,
    pub sample_id: String,
    pub display_label: String,
}

/// All points of one analysis, grouped by cluster for rendering.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClusterSet {
    points: Vec<ClusterPoint>,
}

impl ClusterSet {
    #[must_use]
    pub fn new(points: Vec<ClusterPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[ClusterPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points keyed by cluster id in ascending id order.
    #[must_use]
    pub fn groups(&self) -> BTreeMap<i64, Vec<&ClusterPoint>> {
        let mut groups: BTreeMap<i64, Vec<&ClusterPoint>> = BTreeMap::new();
        for point in &self.points {
            groups.entry(point.cluster_id).or_default().push(point);
        }
        groups
    }

    /// Distinct cluster ids in ascending order.
    #[must_use]
    pub fn cluster_ids(&self) -> Vec<i64> {
        self.groups().into_keys().collect()
    }

    #[must_use]
    pub fn distinct_clusters(&self) -> usize {
        self.groups().len()
    }
}

/// Ground-truth group per sample id.
pub type SampleLabels = BTreeMap<String, String>;

/// A complete, successfully decoded analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub clusters: ClusterSet,
    /// `clusters` exactly as returned by the backend.
    pub raw_clusters: Value,
    pub manifest: Value,
    pub explainability: Option<Value>,
    pub sample_labels: Option<SampleLabels>,
}

impl AnalysisResult {
    /// Context replayed to the interpretation and chat endpoints.
    #[must_use]
    pub fn context(&self) -> AnalysisContext {
        AnalysisContext {
            manifest: self.manifest.clone(),
            clusters: self.raw_clusters.clone(),
            xai: self.explainability.clone(),
            labels: self.sample_labels.clone(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> ManifestSummary {
        ManifestSummary::from_manifest(&self.manifest)
    }
}

/// Analysis context in the shape the assistant endpoints expect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContext {
    pub manifest: Value,
    pub clusters: Value,
    pub xai: Option<Value>,
    pub labels: Option<SampleLabels>,
}

/// The handful of manifest fields the UI displays. The manifest itself is
/// opaque, so every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestSummary {
    pub algorithm: Option<String>,
    pub n_clusters: Option<u64>,
    pub created_at: Option<String>,
}

impl ManifestSummary {
    #[must_use]
    pub fn from_manifest(manifest: &Value) -> Self {
        let text = |key: &str| {
            manifest
                .get(key)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };
        Self {
            algorithm: text("algorithm"),
            n_clusters: manifest.get("n_clusters").and_then(Value::as_u64),
            created_at: text("created_at"),
        }
    }
}

// =============================================================================
// CHAT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the append-only chat history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(ChatRole::Assistant, content)
    }

    fn with_role(role: ChatRole, content: impl Into<String>) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), role, content: content.into() }
    }
}

// =============================================================================
// PROJECTS
// =============================================================================

/// A saved project as listed by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "lastEdited", default)]
    pub last_edited: Option<String>,
}

/// Stored manifest and report link for one project.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "zipLink", default, skip_serializing_if = "Option::is_none")]
    pub zip_link: Option<String>,
    #[serde(default)]
    pub manifest: Option<Value>,
}

impl ProjectInfo {
    #[must_use]
    pub fn summary(&self) -> ManifestSummary {
        self.manifest.as_ref().map(ManifestSummary::from_manifest).unwrap_or_default()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(serde::de::Error::custom(format!("expected string or number id, got {other}"))),
    }
}
