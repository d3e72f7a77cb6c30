//! MedAI backend client for the browser.
//!
//! Calls go to the server proxy at [`MEDAI_PROXY_BASE`], which forwards them
//! to the MedAI service with the session user as owner. Request bodies and
//! response decoding come from `protocol::codec`, so this file only moves
//! bytes.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use async_trait::async_trait;
use protocol::codec;
use protocol::endpoints::Endpoints;
use protocol::{AnalysisContext, AnalysisRequest, AnalysisResult, ApiError, ChatMessage, Project, ProjectInfo};
use workflow::Backend;

use super::http;

/// Same-origin prefix of the MedAI proxy routes.
pub const MEDAI_PROXY_BASE: &str = "/api/medai";

#[must_use]
pub fn proxy_endpoints() -> Endpoints {
    Endpoints::new(MEDAI_PROXY_BASE)
}

/// `workflow::Backend` over `gloo-net`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpBackend {
    endpoints: Endpoints,
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self { endpoints: proxy_endpoints() }
    }
}

impl HttpBackend {
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn submit_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        let body = http::post_form(&self.endpoints.clustering(), &codec::analysis_form(request)).await?;
        codec::decode_analysis(&body)
    }

    async fn fetch_interpretation(&self, context: &AnalysisContext) -> Result<String, ApiError> {
        let body = http::post_json(&self.endpoints.interpret(), &codec::interpret_body(context)).await?;
        codec::decode_interpretation(&body)
    }

    async fn send_chat_turn(
        &self,
        history: &[ChatMessage],
        context: &AnalysisContext,
    ) -> Result<ChatMessage, ApiError> {
        let body = http::post_json(&self.endpoints.chat(), &codec::chat_body(history, context)).await?;
        codec::decode_chat_reply(&body)
    }

    async fn list_projects(&self, owner_id: &str) -> Result<Vec<Project>, ApiError> {
        let body = http::get(&self.endpoints.projects(owner_id)).await?;
        codec::decode_projects(&body)
    }

    async fn fetch_project_info(&self, owner_id: &str, project_name: &str) -> Result<ProjectInfo, ApiError> {
        let body = http::get(&self.endpoints.project_info(owner_id, project_name)).await?;
        codec::decode_project_info(&body, project_name)
    }

    async fn delete_project(&self, owner_id: &str, project_name: &str) -> Result<(), ApiError> {
        http::get(&self.endpoints.delete_project(owner_id, project_name)).await.map(|_| ())
    }

    async fn upload_report(&self, owner_id: &str, markdown: &str) -> Result<(), ApiError> {
        http::post_form(&self.endpoints.upload_report(), &codec::report_form(owner_id, markdown))
            .await
            .map(|_| ())
    }
}
