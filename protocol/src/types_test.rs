use super::*;
use serde_json::json;

fn csv(name: &str) -> DatasetFile {
    DatasetFile::new(name, b"gene,s1,s2\nTP53,1.0,2.0\n".to_vec())
}

// =============================================================
// Algorithm + params
// =============================================================

#[test]
fn algorithm_parses_wire_names() {
    assert_eq!("kmeans".parse::<Algorithm>(), Ok(Algorithm::Kmeans));
    assert_eq!(" DBSCAN ".parse::<Algorithm>(), Ok(Algorithm::Dbscan));
    assert!(matches!("spectral".parse::<Algorithm>(), Err(ApiError::Validation(_))));
}

#[test]
fn defaults_match_the_settings_form() {
    assert_eq!(
        AlgorithmParams::defaults_for(Algorithm::Kmeans),
        AlgorithmParams::Kmeans { cluster_count: 3, max_iterations: 300 }
    );
    assert_eq!(
        AlgorithmParams::defaults_for(Algorithm::Dbscan),
        AlgorithmParams::Dbscan { epsilon: 0.5, min_samples: 5 }
    );
    assert_eq!(
        AlgorithmParams::defaults_for(Algorithm::Agglomerative),
        AlgorithmParams::Agglomerative { linkage: Linkage::Single }
    );
    for algorithm in Algorithm::ALL {
        assert_eq!(AlgorithmParams::defaults_for(algorithm).algorithm(), algorithm);
    }
}

#[test]
fn params_json_uses_camel_case_keys() {
    let kmeans = AlgorithmParams::Kmeans { cluster_count: 4, max_iterations: 300 };
    assert_eq!(kmeans.to_json(), json!({ "clusterCount": 4, "maxIterations": 300 }));

    let dbscan = AlgorithmParams::Dbscan { epsilon: 0.8, min_samples: 3 };
    assert_eq!(dbscan.to_json(), json!({ "epsilon": 0.8, "minSamples": 3 }));

    let agglomerative = AlgorithmParams::Agglomerative { linkage: Linkage::Complete };
    assert_eq!(agglomerative.to_json(), json!({ "linkage": "complete" }));

    assert_eq!(AlgorithmParams::Auto.to_json(), json!({}));
}

#[test]
fn invalid_params_are_rejected() {
    assert!(AlgorithmParams::Kmeans { cluster_count: 1, max_iterations: 300 }.validate().is_err());
    assert!(AlgorithmParams::Kmeans { cluster_count: 2, max_iterations: 0 }.validate().is_err());
    assert!(AlgorithmParams::Dbscan { epsilon: 0.0, min_samples: 5 }.validate().is_err());
    assert!(AlgorithmParams::Dbscan { epsilon: f64::NAN, min_samples: 5 }.validate().is_err());
    assert!(AlgorithmParams::Dbscan { epsilon: 0.5, min_samples: 0 }.validate().is_err());
    assert!(AlgorithmParams::Auto.validate().is_ok());
}

// =============================================================
// Dataset
// =============================================================

#[test]
fn dataset_extension_is_case_insensitive() {
    assert_eq!(csv("Data.CSV").extension().as_deref(), Some("csv"));
    assert!(csv("matrix.xlsx").is_supported());
    assert!(!csv("notes.pdf").is_supported());
    assert!(!csv("csv").is_supported());
    assert!(!csv(".csv").is_supported());
}

#[test]
fn dataset_content_type_follows_extension() {
    assert_eq!(csv("a.csv").content_type(), "text/csv");
    assert_eq!(csv("a.txt").content_type(), "text/plain");
    assert_eq!(csv("a.xls").content_type(), "application/vnd.ms-excel");
}

// =============================================================
// AnalysisRequest
// =============================================================

#[test]
fn request_requires_a_dataset() {
    let err = AnalysisRequest::new(None, Some("u1"), "Test1", AlgorithmParams::Auto).expect_err("no file");
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn request_rejects_empty_or_unsupported_files() {
    let empty = DatasetFile::new("data.csv", Vec::new());
    let err = AnalysisRequest::new(Some(empty), Some("u1"), "Test1", AlgorithmParams::Auto).expect_err("empty");
    assert!(matches!(err, ApiError::Validation(_)));

    let err = AnalysisRequest::new(Some(csv("data.pdf")), Some("u1"), "Test1", AlgorithmParams::Auto)
        .expect_err("unsupported");
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn request_requires_a_project_name() {
    let err = AnalysisRequest::new(Some(csv("data.csv")), Some("u1"), "   ", AlgorithmParams::Auto)
        .expect_err("blank name");
    assert_eq!(err, ApiError::validation("Enter a project name."));
}

#[test]
fn validation_is_reported_before_missing_identity() {
    let err = AnalysisRequest::new(None, None, "", AlgorithmParams::Auto).expect_err("invalid");
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn missing_owner_is_an_auth_error() {
    let err =
        AnalysisRequest::new(Some(csv("data.csv")), None, "Test1", AlgorithmParams::Auto).expect_err("no owner");
    assert_eq!(err, ApiError::Auth);
    let err = AnalysisRequest::new(Some(csv("data.csv")), Some(" "), "Test1", AlgorithmParams::Auto)
        .expect_err("blank owner");
    assert_eq!(err, ApiError::Auth);
}

#[test]
fn valid_request_trims_project_name() {
    let params = AlgorithmParams::Kmeans { cluster_count: 4, max_iterations: 300 };
    let request = AnalysisRequest::new(Some(csv("data.csv")), Some("u1"), "  Test1 ", params).expect("valid");
    assert_eq!(request.project_name(), "Test1");
    assert_eq!(request.owner_id(), "u1");
    assert_eq!(request.algorithm(), Algorithm::Kmeans);
    assert_eq!(request.dataset().name(), "data.csv");
}

// =============================================================
// Results
// =============================================================

fn point(cluster_id: i64, n: usize) -> ClusterPoint {
    ClusterPoint {
        x: n as f64,
        y: 0.0,
        cluster_id,
        sample_id: format!("Sample {n}"),
        display_label: MISSING_LABEL.to_owned(),
    }
}

#[test]
fn groups_are_keyed_by_cluster_in_ascending_order() {
    let set = ClusterSet::new(vec![point(2, 1), point(0, 2), point(2, 3), point(-1, 4)]);
    let groups = set.groups();
    assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![-1, 0, 2]);
    assert_eq!(groups[&2].len(), 2);
    assert_eq!(set.distinct_clusters(), 3);
    assert_eq!(set.cluster_ids(), vec![-1, 0, 2]);
}

#[test]
fn manifest_summary_is_lenient() {
    let summary = ManifestSummary::from_manifest(&json!({
        "algorithm": "dbscan",
        "n_clusters": 3,
        "created_at": "2025-05-01T10:00:00Z",
        "extra": true
    }));
    assert_eq!(summary.algorithm.as_deref(), Some("dbscan"));
    assert_eq!(summary.n_clusters, Some(3));
    assert_eq!(summary.created_at.as_deref(), Some("2025-05-01T10:00:00Z"));

    assert_eq!(ManifestSummary::from_manifest(&json!({ "n_clusters": "three" })), ManifestSummary::default());
}

#[test]
fn chat_messages_get_unique_ids() {
    let a = ChatMessage::user("hi");
    let b = ChatMessage::user("hi");
    assert_ne!(a.id, b.id);
    assert_eq!(a.role, ChatRole::User);
    assert_eq!(ChatMessage::assistant("hello").role, ChatRole::Assistant);
}

#[test]
fn project_id_accepts_numbers_and_strings() {
    let numeric: Project = serde_json::from_value(json!({ "id": 7, "name": "A", "lastEdited": "today" }))
        .expect("numeric id");
    assert_eq!(numeric.id, "7");
    assert_eq!(numeric.last_edited.as_deref(), Some("today"));

    let text: Project = serde_json::from_value(json!({ "id": "p-1", "name": "B" })).expect("string id");
    assert_eq!(text.id, "p-1");
    assert_eq!(text.last_edited, None);
}
