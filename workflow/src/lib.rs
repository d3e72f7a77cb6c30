//! Analysis orchestration core for the MedAI workbench.
//!
//! This crate is framework-free: it owns the state machines that coordinate a
//! clustering submission, the automatic interpretation that follows it, and
//! the chat session built on top, and it reconciles asynchronous responses
//! through per-stream request tickets. Hosts (the Leptos client, the CLI)
//! supply a [`Backend`] transport and a [`WorkbenchCell`] to hold the state.
//!
//! ARCHITECTURE
//! ============
//! - `seq`: request tickets and last-writer-wins acceptance.
//! - `analysis`: Idle / Submitting / Ready / Failed session.
//! - `assistant`: interpretation state and chat history.
//! - `workbench`: the single container both are mutated through.
//! - `driver`: async glue that issues backend calls and applies responses.

pub mod analysis;
pub mod assistant;
pub mod driver;
pub mod seq;
pub mod workbench;

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures;

pub use analysis::{AnalysisDraft, AnalysisSession, AnalysisStatus, Submission};
pub use assistant::{Assistant, ChatTurn, InterpretationCall, InterpretationState};
pub use driver::{Backend, WorkbenchCell};
pub use seq::{RequestStream, Resolution, Ticket};
pub use workbench::Workbench;
