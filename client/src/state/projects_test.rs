use super::*;
use serde_json::json;

fn project(id: &str, name: &str) -> Project {
    Project { id: id.to_owned(), name: name.to_owned(), last_edited: None }
}

fn loaded() -> ProjectsState {
    let mut state = ProjectsState::default();
    let ticket = state.begin_load();
    state.finish_load(
        ticket,
        Ok(vec![project("1", "Cancer Dataset Analysis"), project("2", "Heart Disease"), project("3", "cancer follow-up")]),
    );
    state
}

// =============================================================
// List
// =============================================================

#[test]
fn load_applies_items() {
    let state = loaded();
    assert!(!state.loading);
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.error, None);
}

#[test]
fn older_list_response_is_discarded() {
    let mut state = ProjectsState::default();
    let first = state.begin_load();
    let second = state.begin_load();

    assert!(state.finish_load(second, Ok(vec![project("2", "New")])).is_applied());
    assert_eq!(state.finish_load(first, Ok(vec![project("1", "Old")])), Resolution::Stale);
    assert_eq!(state.items[0].name, "New");
}

#[test]
fn load_failure_sets_error() {
    let mut state = ProjectsState::default();
    let ticket = state.begin_load();
    state.finish_load(ticket, Err(ApiError::Network("down".to_owned())));
    assert!(!state.loading);
    assert!(state.error.as_deref().is_some_and(|e| e.starts_with("Failed to load projects.")));
}

#[test]
fn search_filters_case_insensitively() {
    let mut state = loaded();
    state.search = "  CANCER ".to_owned();
    let names: Vec<String> = state.filtered().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Cancer Dataset Analysis".to_owned(), "cancer follow-up".to_owned()]);

    state.search.clear();
    assert_eq!(state.filtered().len(), 3);
}

// =============================================================
// Dialog
// =============================================================

#[test]
fn open_then_info_fills_dialog() {
    let mut state = loaded();
    let ticket = state.open("Heart Disease");
    assert!(state.dialog.as_ref().is_some_and(|d| d.loading));

    let info = ProjectInfo {
        name: "Heart Disease".to_owned(),
        zip_link: Some("https://files/x.zip".to_owned()),
        manifest: Some(json!({ "algorithm": "kmeans", "n_clusters": 4 })),
    };
    state.finish_info(ticket, Ok(info));

    let dialog = state.dialog.as_ref().expect("dialog");
    assert!(!dialog.loading);
    assert!(dialog.has_download());
    assert_eq!(dialog.summary().n_clusters, Some(4));
    assert_eq!(dialog.description(), "Clustering report using kmeans.");
}

#[test]
fn info_failure_shows_message() {
    let mut state = loaded();
    let ticket = state.open("Heart Disease");
    state.finish_info(ticket, Err(ApiError::Server("bad".to_owned())));
    let dialog = state.dialog.as_ref().expect("dialog");
    assert_eq!(dialog.error.as_deref(), Some("Failed to load project info."));
    assert_eq!(dialog.title(), "Heart Disease");
    assert_eq!(dialog.description(), "View metadata and download report.");
}

#[test]
fn info_for_closed_dialog_is_discarded() {
    let mut state = loaded();
    let ticket = state.open("Heart Disease");
    state.close();
    assert_eq!(state.finish_info(ticket, Ok(ProjectInfo::default())), Resolution::Stale);
    assert!(state.dialog.is_none());
}

#[test]
fn info_for_previous_project_is_discarded() {
    let mut state = loaded();
    let first = state.open("Heart Disease");
    let second = state.open("Cancer Dataset Analysis");
    assert_eq!(state.finish_info(first, Ok(ProjectInfo::default())), Resolution::Stale);
    assert!(state.finish_info(second, Ok(ProjectInfo::default())).is_applied());
    assert_eq!(state.dialog.as_ref().map(ProjectDialog::title), Some("Cancer Dataset Analysis"));
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_requires_confirmation() {
    let mut state = loaded();
    state.open("Heart Disease");
    assert_eq!(state.begin_delete(), None);

    state.request_delete();
    state.cancel_delete();
    assert_eq!(state.begin_delete(), None);

    state.request_delete();
    assert_eq!(state.begin_delete().as_deref(), Some("Heart Disease"));
    assert_eq!(state.begin_delete(), None);
}

#[test]
fn successful_delete_removes_project_and_closes_dialog() {
    let mut state = loaded();
    state.open("Heart Disease");
    state.request_delete();
    let name = state.begin_delete().expect("confirmed");
    state.finish_delete(&name, Ok(()));

    assert!(state.dialog.is_none());
    assert!(state.items.iter().all(|p| p.name != "Heart Disease"));
}

#[test]
fn failed_delete_keeps_dialog_open() {
    let mut state = loaded();
    state.open("Heart Disease");
    state.request_delete();
    let name = state.begin_delete().expect("confirmed");
    state.finish_delete(&name, Err(ApiError::Network("down".to_owned())));

    let dialog = state.dialog.as_ref().expect("dialog");
    assert!(!dialog.deleting);
    assert!(dialog.error.is_some());
    assert_eq!(state.items.len(), 3);
}
