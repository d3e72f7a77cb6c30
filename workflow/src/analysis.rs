//! Analysis session state: one clustering submission at a time.
//!
//! DESIGN
//! ======
//! `Idle -> Submitting -> {Ready, Failed}`. `start` validates synchronously and
//! leaves the phase untouched on rejection. Each submission takes a ticket, so
//! a slower earlier submission can never overwrite a later one.
//!
//! A failed submission keeps its request (file bytes included) so `retry`
//! can resubmit it without the user selecting the file again. The retained
//! request is dropped on success, reset, or any fresh start.

#[cfg(test)]
#[path = "analysis_test.rs"]
mod analysis_test;

use std::sync::Arc;

use protocol::{AlgorithmParams, AnalysisRequest, AnalysisResult, ApiError, DatasetFile};

use crate::seq::{RequestStream, Resolution, Ticket};

/// User-editable inputs of the settings form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisDraft {
    pub dataset: Option<DatasetFile>,
    pub project_name: String,
    pub params: AlgorithmParams,
}

/// A request accepted for submission together with its ticket.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub ticket: Ticket,
    pub request: AnalysisRequest,
}

/// Coarse session status for rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Submitting,
    Ready,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    Submitting,
    Ready(Arc<AnalysisResult>),
    Failed(ApiError),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisSession {
    phase: Phase,
    stream: RequestStream,
    in_flight: Option<AnalysisRequest>,
    retained: Option<AnalysisRequest>,
}

impl AnalysisSession {
    /// Validate `draft` and enter `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns the validation or auth error from [`AnalysisRequest::new`];
    /// the session is unchanged in that case.
    pub fn start(&mut self, draft: &AnalysisDraft, owner_id: Option<&str>) -> Result<Submission, ApiError> {
        let request = AnalysisRequest::new(draft.dataset.clone(), owner_id, &draft.project_name, draft.params)?;
        Ok(self.submit(request))
    }

    /// Resubmit the request retained from the last failure.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the session is not `Failed` or nothing
    /// was retained.
    pub fn retry(&mut self) -> Result<Submission, ApiError> {
        if !matches!(self.phase, Phase::Failed(_)) {
            return Err(ApiError::validation("Only a failed analysis can be retried."));
        }
        let Some(request) = self.retained.take() else {
            return Err(ApiError::validation("Nothing to retry. Start a new analysis."));
        };
        Ok(self.submit(request))
    }

    fn submit(&mut self, request: AnalysisRequest) -> Submission {
        let ticket = self.stream.issue();
        log::debug!("analysis #{} submitting project {:?}", ticket.seq(), request.project_name());
        self.phase = Phase::Submitting;
        self.retained = None;
        self.in_flight = Some(request.clone());
        Submission { ticket, request }
    }

    /// Apply the backend outcome for `ticket` unless a newer submission exists.
    pub fn resolve(&mut self, ticket: Ticket, outcome: Result<AnalysisResult, ApiError>) -> Resolution {
        if self.stream.accept(ticket) == Resolution::Stale {
            log::debug!("analysis #{} resolved after being superseded; discarded", ticket.seq());
            return Resolution::Stale;
        }
        match outcome {
            Ok(result) => {
                self.in_flight = None;
                self.retained = None;
                self.phase = Phase::Ready(Arc::new(result));
            }
            Err(err) => {
                log::warn!("analysis #{} failed [{}]: {err}", ticket.seq(), err.code());
                self.retained = self.in_flight.take();
                self.phase = Phase::Failed(err);
            }
        }
        Resolution::Applied
    }

    /// `Ready -> Idle`, discarding the result. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        if !matches!(self.phase, Phase::Ready(_)) {
            return false;
        }
        self.phase = Phase::Idle;
        true
    }

    /// `Failed -> Idle`, dropping the retained request.
    pub fn reset(&mut self) -> bool {
        if !matches!(self.phase, Phase::Failed(_)) {
            return false;
        }
        self.retained = None;
        self.phase = Phase::Idle;
        true
    }

    #[must_use]
    pub fn status(&self) -> AnalysisStatus {
        match self.phase {
            Phase::Idle => AnalysisStatus::Idle,
            Phase::Submitting => AnalysisStatus::Submitting,
            Phase::Ready(_) => AnalysisStatus::Ready,
            Phase::Failed(_) => AnalysisStatus::Failed,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    /// The live result, if the session is `Ready`.
    #[must_use]
    pub fn result(&self) -> Option<Arc<AnalysisResult>> {
        match &self.phase {
            Phase::Ready(result) => Some(Arc::clone(result)),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.retained.is_some() && matches!(self.phase, Phase::Failed(_))
    }

    /// Request kept for retry after a failure.
    #[must_use]
    pub fn retained_request(&self) -> Option<&AnalysisRequest> {
        self.retained.as_ref()
    }
}
