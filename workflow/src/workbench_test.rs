use super::*;
use crate::analysis::AnalysisStatus;
use crate::fixtures::{OWNER, draft, result};

fn ready_workbench() -> Workbench {
    let mut workbench = Workbench::default();
    let submission = workbench.start_analysis(&draft("Test1"), Some(OWNER)).expect("start");
    let call = workbench.complete_analysis(submission.ticket, Ok(result("a", 2, 4))).expect("interpretation call");
    workbench.complete_interpretation(call.ticket, Ok("Two groups.".to_owned()));
    workbench
}

#[test]
fn applied_result_requests_interpretation() {
    let mut workbench = Workbench::default();
    let submission = workbench.start_analysis(&draft("Test1"), Some(OWNER)).expect("start");
    let call = workbench.complete_analysis(submission.ticket, Ok(result("a", 2, 4)));

    let call = call.expect("interpretation call");
    assert_eq!(call.context.manifest["tag"], "a");
    assert!(workbench.assistant().interpretation().is_loading);
    assert!(!workbench.analysis().is_loading());
}

#[test]
fn failed_or_stale_analysis_requests_nothing() {
    let mut workbench = Workbench::default();
    let first = workbench.start_analysis(&draft("First"), Some(OWNER)).expect("start");
    let second = workbench.start_analysis(&draft("Second"), Some(OWNER)).expect("start");

    assert!(workbench.complete_analysis(first.ticket, Ok(result("first", 2, 2))).is_none());
    assert!(workbench.complete_analysis(second.ticket, Err(ApiError::Network("down".to_owned()))).is_none());
    assert_eq!(workbench.analysis().status(), AnalysisStatus::Failed);
}

#[test]
fn starting_a_new_analysis_invalidates_the_assistant() {
    let mut workbench = ready_workbench();
    workbench.open_chat();
    workbench.start_analysis(&draft("Next"), Some(OWNER)).expect("start");

    assert!(workbench.assistant().context().is_none());
    assert_eq!(workbench.assistant().interpretation().text, None);
    assert!(!workbench.assistant().is_chat_open());
}

#[test]
fn rejected_start_keeps_the_assistant() {
    let mut workbench = ready_workbench();
    assert!(workbench.start_analysis(&draft(""), Some(OWNER)).is_err());
    assert_eq!(workbench.assistant().interpretation().text.as_deref(), Some("Two groups."));
}

#[test]
fn interpretation_of_superseded_result_is_discarded() {
    let mut workbench = Workbench::default();
    let first = workbench.start_analysis(&draft("First"), Some(OWNER)).expect("start");
    let call = workbench.complete_analysis(first.ticket, Ok(result("first", 2, 2))).expect("call");

    workbench.start_analysis(&draft("Second"), Some(OWNER)).expect("start");
    assert_eq!(workbench.complete_interpretation(call.ticket, Ok("stale".to_owned())), Resolution::Stale);
    assert_eq!(workbench.assistant().interpretation().text, None);
}

#[test]
fn clear_results_resets_result_interpretation_and_chat() {
    let mut workbench = ready_workbench();
    workbench.open_chat();
    assert!(workbench.clear_results());

    assert!(workbench.analysis().result().is_none());
    assert_eq!(workbench.assistant().interpretation().text, None);
    assert!(workbench.assistant().messages().is_empty());

    workbench.open_chat();
    assert!(workbench.assistant().messages().is_empty());
}

#[test]
fn dismiss_failure_returns_to_idle() {
    let mut workbench = Workbench::default();
    let submission = workbench.start_analysis(&draft("Test1"), Some(OWNER)).expect("start");
    workbench.complete_analysis(submission.ticket, Err(ApiError::Server("bad".to_owned())));

    assert!(workbench.dismiss_failure());
    assert_eq!(workbench.analysis().status(), AnalysisStatus::Idle);
}

#[test]
fn retry_after_failure_runs_a_new_submission() {
    let mut workbench = Workbench::default();
    let submission = workbench.start_analysis(&draft("Test1"), Some(OWNER)).expect("start");
    workbench.complete_analysis(submission.ticket, Err(ApiError::Network("down".to_owned())));

    let retry = workbench.retry_analysis().expect("retry");
    let call = workbench.complete_analysis(retry.ticket, Ok(result("b", 2, 2)));
    assert!(call.is_some());
}

#[test]
fn chat_passthroughs_reach_the_assistant() {
    let mut workbench = ready_workbench();
    workbench.open_chat();
    let turn = workbench.send_chat_message("Hi").expect("send");
    assert!(workbench.complete_chat_turn(turn.ticket, Ok(ChatMessage::assistant("Hello"))).is_applied());
    assert_eq!(workbench.assistant().messages().len(), 3);

    workbench.clear_interpretation();
    assert_eq!(workbench.assistant().messages().len(), 3);
    workbench.close_chat();
    assert!(!workbench.assistant().is_chat_open());
}
