use super::*;
use protocol::ChatRole;
use serde_json::json;

fn context(tag: &str) -> AnalysisContext {
    AnalysisContext {
        manifest: json!({ "tag": tag }),
        clusters: json!({ "points": [] }),
        xai: None,
        labels: None,
    }
}

fn interpreted(text: &str) -> Assistant {
    let mut assistant = Assistant::default();
    let call = assistant.begin_interpretation(context("a"));
    assistant.resolve_interpretation(call.ticket, Ok(text.to_owned()));
    assistant
}

// =============================================================
// Interpretation
// =============================================================

#[test]
fn begin_interpretation_sets_loading() {
    let mut assistant = Assistant::default();
    let call = assistant.begin_interpretation(context("a"));
    assert_eq!(call.context, context("a"));
    assert_eq!(assistant.interpretation(), &InterpretationState { text: None, is_loading: true, is_error: false });
}

#[test]
fn interpretation_success_stores_text() {
    let assistant = interpreted("Two groups.");
    assert_eq!(assistant.interpretation().text.as_deref(), Some("Two groups."));
    assert!(!assistant.interpretation().is_loading);
    assert_eq!(assistant.report_text(), Some("Two groups."));
}

#[test]
fn interpretation_failure_stores_placeholder() {
    let mut assistant = Assistant::default();
    let call = assistant.begin_interpretation(context("a"));
    assistant.resolve_interpretation(call.ticket, Err(ApiError::Network("down".to_owned())));

    let state = assistant.interpretation();
    assert_eq!(state.text.as_deref(), Some(ASSISTANT_ERROR_PLACEHOLDER));
    assert!(state.is_error);
    assert!(!state.is_loading);
    assert_eq!(assistant.report_text(), None);
}

#[test]
fn interpretation_for_previous_result_is_discarded() {
    let mut assistant = Assistant::default();
    let old = assistant.begin_interpretation(context("old"));
    let new = assistant.begin_interpretation(context("new"));

    assert_eq!(assistant.resolve_interpretation(old.ticket, Ok("old text".to_owned())), Resolution::Stale);
    assert!(assistant.interpretation().is_loading);
    assert!(assistant.resolve_interpretation(new.ticket, Ok("new text".to_owned())).is_applied());
    assert_eq!(assistant.interpretation().text.as_deref(), Some("new text"));
}

#[test]
fn clear_interpretation_leaves_open_chat_alone() {
    let mut assistant = interpreted("Two groups.");
    assistant.open_chat();
    assistant.clear_interpretation();

    assert_eq!(assistant.interpretation().text, None);
    assert!(assistant.is_chat_open());
    assert_eq!(assistant.messages().len(), 1);
}

// =============================================================
// Chat
// =============================================================

#[test]
fn open_chat_seeds_interpretation() {
    let mut assistant = interpreted("Two groups.");
    assistant.open_chat();
    let messages = assistant.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, ChatRole::Assistant);
    assert_eq!(messages[0].content, "Two groups.");
}

#[test]
fn open_chat_does_not_seed_placeholder() {
    let mut assistant = Assistant::default();
    let call = assistant.begin_interpretation(context("a"));
    assistant.resolve_interpretation(call.ticket, Err(ApiError::Server("bad".to_owned())));
    assistant.open_chat();
    assert!(assistant.messages().is_empty());
}

#[test]
fn reopening_chat_starts_fresh() {
    let mut assistant = interpreted("Two groups.");
    assistant.open_chat();
    let turn = assistant.send_message("Hi").expect("send");
    assistant.resolve_turn(turn.ticket, Ok(ChatMessage::assistant("Hello")));
    assert_eq!(assistant.messages().len(), 3);

    assistant.close_chat();
    assistant.open_chat();
    assert_eq!(assistant.messages().len(), 1);
}

#[test]
fn send_appends_user_message_synchronously() {
    let mut assistant = interpreted("Two groups.");
    assistant.open_chat();
    let turn = assistant.send_message("How many clusters?").expect("send");

    assert!(assistant.is_turn_pending());
    let last = assistant.messages().last().expect("user message");
    assert_eq!(last.role, ChatRole::User);
    assert_eq!(last.content, "How many clusters?");
    assert_eq!(turn.history, assistant.messages());
    assert_eq!(turn.context, context("a"));
}

#[test]
fn send_rejections_append_nothing() {
    let mut assistant = interpreted("Two groups.");
    assert!(matches!(assistant.send_message("Hi"), Err(ApiError::Validation(_))));

    assistant.open_chat();
    assert!(matches!(assistant.send_message("   "), Err(ApiError::Validation(_))));
    assert_eq!(assistant.messages().len(), 1);

    let _turn = assistant.send_message("Hi").expect("send");
    assert!(matches!(assistant.send_message("Again"), Err(ApiError::Validation(_))));
    assert_eq!(assistant.messages().len(), 2);
}

#[test]
fn send_without_analysis_is_rejected() {
    let mut assistant = Assistant::default();
    assistant.open_chat();
    assert!(matches!(assistant.send_message("Hi"), Err(ApiError::Validation(_))));
    assert!(assistant.messages().is_empty());
}

#[test]
fn failed_turn_appends_one_placeholder() {
    let mut assistant = interpreted("Two groups.");
    assistant.open_chat();
    let turn = assistant.send_message("Hi").expect("send");
    assistant.resolve_turn(turn.ticket, Err(ApiError::Network("down".to_owned())));

    let messages = assistant.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].role, ChatRole::Assistant);
    assert_eq!(messages[2].content, ASSISTANT_ERROR_PLACEHOLDER);
    assert!(!assistant.is_turn_pending());
}

#[test]
fn reply_after_close_is_discarded() {
    let mut assistant = interpreted("Two groups.");
    assistant.open_chat();
    let turn = assistant.send_message("Hi").expect("send");
    assistant.close_chat();

    assert_eq!(assistant.resolve_turn(turn.ticket, Ok(ChatMessage::assistant("late"))), Resolution::Stale);
    assert!(assistant.messages().is_empty());
}

#[test]
fn previous_turns_are_replayed_unchanged() {
    let mut assistant = interpreted("Two groups.");
    assistant.open_chat();
    let first = assistant.send_message("  First question  ").expect("send");
    assistant.resolve_turn(first.ticket, Ok(ChatMessage::assistant("First answer")));

    let second = assistant.send_message("Second question").expect("send");
    let sent_user = &first.history[1];
    assert!(second.history.contains(sent_user));
    assert_eq!(second.history[1].content, "  First question  ");
    assert_eq!(second.history.len(), 4);
}

#[test]
fn invalidate_drops_everything() {
    let mut assistant = interpreted("Two groups.");
    assistant.open_chat();
    let turn = assistant.send_message("Hi").expect("send");
    assistant.invalidate();

    assert!(assistant.context().is_none());
    assert_eq!(assistant.interpretation(), &InterpretationState::default());
    assert!(!assistant.is_chat_open());
    assert!(assistant.messages().is_empty());
    assert_eq!(assistant.resolve_turn(turn.ticket, Ok(ChatMessage::assistant("late"))), Resolution::Stale);
}
