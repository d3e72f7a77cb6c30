use super::*;

#[test]
fn project_line_is_tab_separated() {
    let project = Project { id: "7".to_owned(), name: "demo".to_owned(), last_edited: Some("2024-05-01".to_owned()) };
    assert_eq!(format_project_line(&project), "demo\t7\t2024-05-01");

    let bare = Project { id: "8".to_owned(), name: "other".to_owned(), last_edited: None };
    assert_eq!(format_project_line(&bare), "other\t8");
}

#[test]
fn project_info_lists_known_manifest_fields() {
    let info = ProjectInfo {
        name: "demo".to_owned(),
        zip_link: Some("https://files.example.com/demo.zip".to_owned()),
        manifest: Some(serde_json::json!({ "algorithm": "kmeans", "n_clusters": 3 })),
    };
    let text = render_project_info(&info);
    assert!(text.contains("Project:   demo"));
    assert!(text.contains("Algorithm: kmeans"));
    assert!(text.contains("Clusters:  3"));
    assert!(text.contains("Archive:   https://files.example.com/demo.zip"));
    assert!(!text.contains("Created"));
}

#[test]
fn archive_path_is_filesystem_safe() {
    assert_eq!(default_archive_path("run 1/final"), PathBuf::from("run_1_final.zip"));
    assert_eq!(default_archive_path("ok-name_2.v1"), PathBuf::from("ok-name_2.v1.zip"));
}
