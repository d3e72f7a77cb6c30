//! Backend endpoint paths and URL construction.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser reaches these paths through the server proxy (`/api/medai`),
//! while the CLI and the proxy itself call the backend base URL directly.
//! Both go through [`Endpoints`] so query encoding is identical everywhere.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

pub const CLUSTERING_PATH: &str = "/clustering/clustering";
pub const INTERPRET_PATH: &str = "/interpret";
pub const CHAT_PATH: &str = "/chat";
pub const PROJECTS_PATH: &str = "/projects";
pub const PROJECT_INFO_PATH: &str = "/project-info";
pub const DELETE_PROJECT_PATH: &str = "/delete-project";
pub const DOWNLOAD_PROXY_PATH: &str = "/download-proxy";
pub const UPLOAD_REPORT_PATH: &str = "/upload_medai";

/// URL builder rooted at a backend (or proxy) base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Trailing slashes on `base` are ignored.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { base: base.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Join `path` (which must start with `/`) onto the base.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    #[must_use]
    pub fn clustering(&self) -> String {
        self.url(CLUSTERING_PATH)
    }

    #[must_use]
    pub fn interpret(&self) -> String {
        self.url(INTERPRET_PATH)
    }

    #[must_use]
    pub fn chat(&self) -> String {
        self.url(CHAT_PATH)
    }

    #[must_use]
    pub fn projects(&self, user_id: &str) -> String {
        format!("{}?user_id={}", self.url(PROJECTS_PATH), urlencoding::encode(user_id))
    }

    #[must_use]
    pub fn project_info(&self, user_id: &str, project_name: &str) -> String {
        self.project_url(PROJECT_INFO_PATH, user_id, project_name)
    }

    #[must_use]
    pub fn delete_project(&self, user_id: &str, project_name: &str) -> String {
        self.project_url(DELETE_PROJECT_PATH, user_id, project_name)
    }

    #[must_use]
    pub fn download(&self, user_id: &str, project_name: &str) -> String {
        self.project_url(DOWNLOAD_PROXY_PATH, user_id, project_name)
    }

    #[must_use]
    pub fn upload_report(&self) -> String {
        self.url(UPLOAD_REPORT_PATH)
    }

    fn project_url(&self, path: &str, user_id: &str, project_name: &str) -> String {
        format!(
            "{}?user_id={}&project_name={}",
            self.url(path),
            urlencoding::encode(user_id),
            urlencoding::encode(project_name)
        )
    }
}
