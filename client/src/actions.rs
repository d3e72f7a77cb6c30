//! User actions that cross from the view into the MedAI backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components call these instead of touching the network. Each action does
//! its synchronous part first (validation, state transition, ticket) so the
//! UI reflects it on the same frame, then spawns the backend call and
//! applies the response through the owning state holder.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use leptos::prelude::*;
use leptos::task::spawn_local;
use protocol::ApiError;
use workflow::driver::{drive_analysis, drive_chat_turn};
use workflow::{Backend, Workbench, WorkbenchCell};

use crate::net::backend::HttpBackend;
use crate::state::analysis_form::AnalysisFormState;
use crate::state::auth::AuthState;
use crate::state::projects::ProjectsState;
use crate::state::workbench::WorkbenchSignal;
use crate::util::auth::sign_out_on_auth_error;

// =============================================================================
// ANALYSIS
// =============================================================================

/// Submit the form's draft. Validation problems land in the form message.
pub fn start_analysis(workbench: WorkbenchSignal, auth: RwSignal<AuthState>, form: RwSignal<AnalysisFormState>) {
    let draft = form.with_untracked(|state| state.draft.clone());
    let owner = auth.with_untracked(|state| state.owner_id().map(str::to_owned));
    let Some(started) = workbench.update(|bench| bench.start_analysis(&draft, owner.as_deref())) else {
        return;
    };
    match started {
        Ok(submission) => {
            form.update(|state| state.message = None);
            spawn_local(async move {
                drive_analysis(&workbench, &HttpBackend::default(), submission).await;
            });
        }
        Err(err) => {
            sign_out_on_auth_error(auth, &err);
            form.update(|state| state.message = Some(err.user_message()));
        }
    }
}

/// Resubmit the retained request after a failure.
pub fn retry_analysis(workbench: WorkbenchSignal) {
    match workbench.update(Workbench::retry_analysis) {
        Some(Ok(submission)) => spawn_local(async move {
            drive_analysis(&workbench, &HttpBackend::default(), submission).await;
        }),
        Some(Err(err)) => log_rejected("retry", &err),
        None => {}
    }
}

// =============================================================================
// CHAT
// =============================================================================

/// Append the message and send the turn.
///
/// # Errors
///
/// The synchronous rejection (blank text, chat closed, reply pending, no
/// analysis) for the chat input to display.
pub fn send_chat_message(workbench: WorkbenchSignal, text: &str) -> Result<(), ApiError> {
    let Some(sent) = workbench.update(|bench| bench.send_chat_message(text)) else {
        return Ok(());
    };
    let turn = sent?;
    spawn_local(async move {
        drive_chat_turn(&workbench, &HttpBackend::default(), turn).await;
    });
    Ok(())
}

// =============================================================================
// REPORTS
// =============================================================================

/// Progress of "Save as report".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    Failed(String),
}

/// Upload the current interpretation as a markdown report.
pub fn save_report(workbench: WorkbenchSignal, auth: RwSignal<AuthState>, status: RwSignal<SaveStatus>) {
    let Some(markdown) = workbench.with_untracked(|bench| bench.assistant().report_text().map(str::to_owned)) else {
        status.set(SaveStatus::Failed("There is no interpretation to save yet.".to_owned()));
        return;
    };
    let Some(owner) = auth.with_untracked(|state| state.owner_id().map(str::to_owned)) else {
        sign_out_on_auth_error(auth, &ApiError::Auth);
        return;
    };
    status.set(SaveStatus::Saving);
    spawn_local(async move {
        let next = match HttpBackend::default().upload_report(&owner, &markdown).await {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                sign_out_on_auth_error(auth, &err);
                SaveStatus::Failed(format!("Report not saved. {}", err.user_message()))
            }
        };
        status.try_set(next);
    });
}

// =============================================================================
// PROJECTS
// =============================================================================

pub fn load_projects(projects: RwSignal<ProjectsState>, auth: RwSignal<AuthState>) {
    let Some(owner) = auth.with_untracked(|state| state.owner_id().map(str::to_owned)) else {
        return;
    };
    let Some(ticket) = projects.try_update(ProjectsState::begin_load) else {
        return;
    };
    spawn_local(async move {
        let outcome = signed_out_on_auth(auth, HttpBackend::default().list_projects(&owner).await);
        projects.try_update(|state| state.finish_load(ticket, outcome));
    });
}

pub fn open_project(projects: RwSignal<ProjectsState>, auth: RwSignal<AuthState>, name: String) {
    let Some(owner) = auth.with_untracked(|state| state.owner_id().map(str::to_owned)) else {
        return;
    };
    let Some(ticket) = projects.try_update(|state| state.open(&name)) else {
        return;
    };
    spawn_local(async move {
        let outcome = signed_out_on_auth(auth, HttpBackend::default().fetch_project_info(&owner, &name).await);
        projects.try_update(|state| state.finish_info(ticket, outcome));
    });
}

/// Delete the open project once the user has confirmed.
pub fn delete_project(projects: RwSignal<ProjectsState>, auth: RwSignal<AuthState>) {
    let Some(owner) = auth.with_untracked(|state| state.owner_id().map(str::to_owned)) else {
        return;
    };
    let Some(name) = projects.try_update(ProjectsState::begin_delete).flatten() else {
        return;
    };
    spawn_local(async move {
        let outcome = signed_out_on_auth(auth, HttpBackend::default().delete_project(&owner, &name).await);
        projects.try_update(|state| state.finish_delete(&name, outcome));
    });
}

/// Pass a projects outcome through, signing out locally on an auth error.
fn signed_out_on_auth<T>(auth: RwSignal<AuthState>, outcome: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(err) = &outcome {
        sign_out_on_auth_error(auth, err);
    }
    outcome
}

fn log_rejected(action: &str, err: &ApiError) {
    #[cfg(feature = "hydrate")]
    log::debug!("{action} rejected [{}]: {err}", err.code());
    #[cfg(not(feature = "hydrate"))]
    let _ = (action, err);
}
