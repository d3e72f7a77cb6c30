//! Saved-project inventory and the open project dialog.
//!
//! DESIGN
//! ======
//! List refreshes and project-info fetches each take a ticket from their own
//! [`RequestStream`], so a slow earlier response never replaces a newer one
//! and closing the dialog discards whatever info is still in flight.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use protocol::{ApiError, ManifestSummary, Project, ProjectInfo};
use workflow::{RequestStream, Resolution, Ticket};

/// Project dialog for one selected project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectDialog {
    pub name: String,
    pub info: Option<ProjectInfo>,
    pub loading: bool,
    pub error: Option<String>,
    pub confirm_delete: bool,
    pub deleting: bool,
}

impl ProjectDialog {
    #[must_use]
    pub fn summary(&self) -> ManifestSummary {
        self.info.as_ref().map(ProjectInfo::summary).unwrap_or_default()
    }

    /// Dialog title: the stored name, falling back to the selected one.
    #[must_use]
    pub fn title(&self) -> &str {
        self.info
            .as_ref()
            .map(|info| info.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self.summary().algorithm {
            Some(algorithm) => format!("Clustering report using {algorithm}."),
            None => "View metadata and download report.".to_owned(),
        }
    }

    #[must_use]
    pub fn has_download(&self) -> bool {
        self.info.as_ref().is_some_and(|info| info.zip_link.is_some())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectsState {
    pub items: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: String,
    pub dialog: Option<ProjectDialog>,
    list_stream: RequestStream,
    info_stream: RequestStream,
}

impl ProjectsState {
    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.error = None;
        self.list_stream.issue()
    }

    pub fn finish_load(&mut self, ticket: Ticket, outcome: Result<Vec<Project>, ApiError>) -> Resolution {
        if !self.list_stream.accept(ticket).is_applied() {
            return Resolution::Stale;
        }
        self.loading = false;
        match outcome {
            Ok(items) => self.items = items,
            Err(err) => self.error = Some(format!("Failed to load projects. {}", err.user_message())),
        }
        Resolution::Applied
    }

    /// Projects whose name contains the search text, ignoring case.
    #[must_use]
    pub fn filtered(&self) -> Vec<Project> {
        let needle = self.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|project| needle.is_empty() || project.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Open the dialog for `name` and start loading its info.
    pub fn open(&mut self, name: &str) -> Ticket {
        self.dialog = Some(ProjectDialog { name: name.to_owned(), loading: true, ..ProjectDialog::default() });
        self.info_stream.issue()
    }

    pub fn finish_info(&mut self, ticket: Ticket, outcome: Result<ProjectInfo, ApiError>) -> Resolution {
        if !self.info_stream.accept(ticket).is_applied() {
            return Resolution::Stale;
        }
        let Some(dialog) = self.dialog.as_mut() else {
            return Resolution::Stale;
        };
        dialog.loading = false;
        match outcome {
            Ok(info) => dialog.info = Some(info),
            Err(_) => dialog.error = Some("Failed to load project info.".to_owned()),
        }
        Resolution::Applied
    }

    pub fn close(&mut self) {
        self.dialog = None;
        self.info_stream.invalidate();
    }

    /// Ask for confirmation before deleting the open project.
    pub fn request_delete(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.confirm_delete = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.confirm_delete = false;
        }
    }

    /// Confirmed deletion starts. Returns the project name to delete.
    pub fn begin_delete(&mut self) -> Option<String> {
        let dialog = self.dialog.as_mut().filter(|dialog| dialog.confirm_delete && !dialog.deleting)?;
        dialog.deleting = true;
        dialog.confirm_delete = false;
        Some(dialog.name.clone())
    }

    /// Apply a delete outcome: on success the project leaves the list and the
    /// dialog closes.
    pub fn finish_delete(&mut self, name: &str, outcome: Result<(), ApiError>) {
        match outcome {
            Ok(()) => {
                self.items.retain(|project| project.name != name);
                if self.dialog.as_ref().is_some_and(|dialog| dialog.name == name) {
                    self.close();
                }
            }
            Err(err) => {
                if let Some(dialog) = self.dialog.as_mut().filter(|dialog| dialog.name == name) {
                    dialog.deleting = false;
                    dialog.error = Some(format!("Failed to delete project. {}", err.user_message()));
                }
            }
        }
    }
}
