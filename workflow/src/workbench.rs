//! Single state container for the analysis workflow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views read one `Workbench` snapshot and mutate it only through the methods
//! below. Cross-holder rules live here: starting or clearing an analysis
//! invalidates the assistant, and a newly applied result hands back the
//! interpretation call the host must issue.

#[cfg(test)]
#[path = "workbench_test.rs"]
mod workbench_test;

use protocol::{AnalysisResult, ApiError, ChatMessage};

use crate::analysis::{AnalysisDraft, AnalysisSession, Submission};
use crate::assistant::{Assistant, ChatTurn, InterpretationCall};
use crate::seq::{Resolution, Ticket};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workbench {
    analysis: AnalysisSession,
    assistant: Assistant,
}

impl Workbench {
    #[must_use]
    pub fn analysis(&self) -> &AnalysisSession {
        &self.analysis
    }

    #[must_use]
    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    /// Start a submission; on success the previous result's interpretation
    /// and chat are dropped.
    ///
    /// # Errors
    ///
    /// Validation or auth errors from [`AnalysisSession::start`]; nothing
    /// changes in that case.
    pub fn start_analysis(&mut self, draft: &AnalysisDraft, owner_id: Option<&str>) -> Result<Submission, ApiError> {
        let submission = self.analysis.start(draft, owner_id)?;
        self.assistant.invalidate();
        Ok(submission)
    }

    /// Resubmit the retained request of a failed analysis.
    ///
    /// # Errors
    ///
    /// See [`AnalysisSession::retry`].
    pub fn retry_analysis(&mut self) -> Result<Submission, ApiError> {
        let submission = self.analysis.retry()?;
        self.assistant.invalidate();
        Ok(submission)
    }

    /// Apply a submission outcome. When a new result lands, returns the
    /// interpretation call to issue next.
    pub fn complete_analysis(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, ApiError>,
    ) -> Option<InterpretationCall> {
        if !self.analysis.resolve(ticket, outcome).is_applied() {
            return None;
        }
        let result = self.analysis.result()?;
        Some(self.assistant.begin_interpretation(result.context()))
    }

    pub fn complete_interpretation(&mut self, ticket: Ticket, outcome: Result<String, ApiError>) -> Resolution {
        self.assistant.resolve_interpretation(ticket, outcome)
    }

    /// "Clear" on the results panel: drops the result, its interpretation,
    /// and its chat.
    pub fn clear_results(&mut self) -> bool {
        if !self.analysis.clear() {
            return false;
        }
        self.assistant.invalidate();
        true
    }

    /// Dismiss a failure and return to `Idle`.
    pub fn dismiss_failure(&mut self) -> bool {
        self.analysis.reset()
    }

    pub fn clear_interpretation(&mut self) {
        self.assistant.clear_interpretation();
    }

    pub fn open_chat(&mut self) {
        self.assistant.open_chat();
    }

    pub fn close_chat(&mut self) {
        self.assistant.close_chat();
    }

    /// # Errors
    ///
    /// See [`Assistant::send_message`].
    pub fn send_chat_message(&mut self, text: &str) -> Result<ChatTurn, ApiError> {
        self.assistant.send_message(text)
    }

    pub fn complete_chat_turn(&mut self, ticket: Ticket, outcome: Result<ChatMessage, ApiError>) -> Resolution {
        self.assistant.resolve_turn(ticket, outcome)
    }
}
