//! Async glue between the workbench and a backend transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hosts implement [`Backend`] (gloo-net in the browser, reqwest in the CLI)
//! and hold the [`Workbench`] in something implementing [`WorkbenchCell`].
//! The `run_*` helpers mutate the workbench synchronously (so validation
//! errors surface before any await), then await the backend and apply the
//! response through its ticket.
//!
//! Calls are never cancelled. A response whose holder is gone, or whose
//! ticket was superseded, is simply not applied.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use std::cell::RefCell;
use std::rc::Weak;

use async_trait::async_trait;
use protocol::{AnalysisContext, AnalysisRequest, AnalysisResult, ApiError, ChatMessage, Project, ProjectInfo};

use crate::analysis::{AnalysisDraft, Submission};
use crate::assistant::{ChatTurn, InterpretationCall};
use crate::seq::Resolution;
use crate::workbench::Workbench;

/// One operation per MedAI backend call.
///
/// Implementations hold no retry logic and no workflow state.
#[async_trait(?Send)]
pub trait Backend {
    async fn submit_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError>;

    async fn fetch_interpretation(&self, context: &AnalysisContext) -> Result<String, ApiError>;

    /// `history` is the complete conversation so far, newest message last.
    async fn send_chat_turn(&self, history: &[ChatMessage], context: &AnalysisContext)
    -> Result<ChatMessage, ApiError>;

    async fn list_projects(&self, owner_id: &str) -> Result<Vec<Project>, ApiError>;

    async fn fetch_project_info(&self, owner_id: &str, project_name: &str) -> Result<ProjectInfo, ApiError>;

    async fn delete_project(&self, owner_id: &str, project_name: &str) -> Result<(), ApiError>;

    async fn upload_report(&self, owner_id: &str, markdown: &str) -> Result<(), ApiError>;
}

/// Holder of the workbench that may outlive the view that created it.
pub trait WorkbenchCell {
    /// Run `f` against the live workbench, or return `None` when the holder
    /// has been disposed.
    fn update<R>(&self, f: impl FnOnce(&mut Workbench) -> R) -> Option<R>;
}

impl WorkbenchCell for RefCell<Workbench> {
    fn update<R>(&self, f: impl FnOnce(&mut Workbench) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl WorkbenchCell for Weak<RefCell<Workbench>> {
    fn update<R>(&self, f: impl FnOnce(&mut Workbench) -> R) -> Option<R> {
        let cell = self.upgrade()?;
        let mut workbench = cell.borrow_mut();
        Some(f(&mut workbench))
    }
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Validate and submit `draft`, then run the automatic interpretation.
///
/// # Errors
///
/// Only synchronous validation or auth errors are returned. Backend failures
/// are recorded in the workbench instead.
pub async fn run_analysis<C, B>(
    cell: &C,
    backend: &B,
    draft: &AnalysisDraft,
    owner_id: Option<&str>,
) -> Result<(), ApiError>
where
    C: WorkbenchCell + ?Sized,
    B: Backend + ?Sized,
{
    let Some(started) = cell.update(|workbench| workbench.start_analysis(draft, owner_id)) else {
        return Ok(());
    };
    drive_analysis(cell, backend, started?).await;
    Ok(())
}

/// Resubmit the retained request of a failed analysis.
///
/// # Errors
///
/// See [`Workbench::retry_analysis`].
pub async fn retry_analysis<C, B>(cell: &C, backend: &B) -> Result<(), ApiError>
where
    C: WorkbenchCell + ?Sized,
    B: Backend + ?Sized,
{
    let Some(started) = cell.update(Workbench::retry_analysis) else {
        return Ok(());
    };
    drive_analysis(cell, backend, started?).await;
    Ok(())
}

/// Await a submission already accepted by the workbench and apply it.
pub async fn drive_analysis<C, B>(cell: &C, backend: &B, submission: Submission)
where
    C: WorkbenchCell + ?Sized,
    B: Backend + ?Sized,
{
    let Submission { ticket, request } = submission;
    let outcome = backend.submit_analysis(&request).await;
    let follow_up = cell.update(|workbench| workbench.complete_analysis(ticket, outcome)).flatten();
    if let Some(call) = follow_up {
        drive_interpretation(cell, backend, call).await;
    }
}

/// Await an interpretation fetch and apply it.
pub async fn drive_interpretation<C, B>(cell: &C, backend: &B, call: InterpretationCall)
where
    C: WorkbenchCell + ?Sized,
    B: Backend + ?Sized,
{
    let InterpretationCall { ticket, context } = call;
    let outcome = backend.fetch_interpretation(&context).await;
    log_unapplied("interpretation", cell.update(|workbench| workbench.complete_interpretation(ticket, outcome)));
}

// =============================================================================
// CHAT
// =============================================================================

/// Append the user's message, send the turn, and append the reply.
///
/// # Errors
///
/// Only the synchronous rejection from [`Workbench::send_chat_message`].
pub async fn send_chat_message<C, B>(cell: &C, backend: &B, text: &str) -> Result<(), ApiError>
where
    C: WorkbenchCell + ?Sized,
    B: Backend + ?Sized,
{
    let Some(sent) = cell.update(|workbench| workbench.send_chat_message(text)) else {
        return Ok(());
    };
    drive_chat_turn(cell, backend, sent?).await;
    Ok(())
}

/// Await a chat turn already appended by the workbench and apply the reply.
pub async fn drive_chat_turn<C, B>(cell: &C, backend: &B, turn: ChatTurn)
where
    C: WorkbenchCell + ?Sized,
    B: Backend + ?Sized,
{
    let ChatTurn { ticket, history, context } = turn;
    let outcome = backend.send_chat_turn(&history, &context).await;
    log_unapplied("chat turn", cell.update(|workbench| workbench.complete_chat_turn(ticket, outcome)));
}

fn log_unapplied(stream: &str, applied: Option<Resolution>) {
    match applied {
        Some(Resolution::Applied) => {}
        Some(Resolution::Stale) => log::debug!("{stream} response was stale"),
        None => log::debug!("{stream} response arrived after the workbench was disposed"),
    }
}
