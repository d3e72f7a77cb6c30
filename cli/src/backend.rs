//! `workflow::Backend` over `reqwest`, talking to the MedAI service directly.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use protocol::codec::{self, FormField, FormValue};
use protocol::endpoints::Endpoints;
use protocol::{AnalysisContext, AnalysisRequest, AnalysisResult, ApiError, ChatMessage, Project, ProjectInfo};
use tokio::io::AsyncWriteExt;
use workflow::Backend;

use crate::CliError;

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Convert codec form fields into a `reqwest` multipart form.
pub(crate) fn to_form(fields: &[FormField]) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for field in fields {
        form = match &field.value {
            FormValue::Text(text) => form.text(field.name, text.clone()),
            FormValue::File { file_name, content_type, bytes } => {
                let part = reqwest::multipart::Part::bytes(bytes.to_vec())
                    .file_name(file_name.clone())
                    .mime_str(content_type)
                    .map_err(|e| ApiError::validation(format!("unusable content type {content_type}: {e}")))?;
                form.part(field.name, part)
            }
        };
    }
    Ok(form)
}

#[derive(Clone, Debug)]
pub struct ReqwestBackend {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl ReqwestBackend {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, endpoints: Endpoints::new(base_url.trim_end_matches('/')) }
    }

    async fn read(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        codec::check_status(status, &body)?;
        Ok(body)
    }

    /// Stream a project's results archive to `dest`. Returns bytes written.
    ///
    /// # Errors
    ///
    /// [`CliError::Api`] for transport or status failures, [`CliError::Io`]
    /// when `dest` cannot be written.
    pub async fn download(&self, owner_id: &str, project_name: &str, dest: &Path) -> Result<u64, CliError> {
        let url = self.endpoints.download(owner_id, project_name);
        tracing::debug!(%url, "downloading project archive");
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            codec::check_status(status, &body)?;
            unreachable!("check_status rejects every non-2xx status");
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0_u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(transport)?;
            file.write_all(&chunk).await?;
            written = written.saturating_add(chunk.len() as u64);
        }
        file.flush().await?;
        Ok(written)
    }
}

#[async_trait(?Send)]
impl Backend for ReqwestBackend {
    async fn submit_analysis(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        let form = to_form(&codec::analysis_form(request))?;
        let body = self.read(self.http.post(self.endpoints.clustering()).multipart(form)).await?;
        codec::decode_analysis(&body)
    }

    async fn fetch_interpretation(&self, context: &AnalysisContext) -> Result<String, ApiError> {
        let request = self.http.post(self.endpoints.interpret()).json(&codec::interpret_body(context));
        codec::decode_interpretation(&self.read(request).await?)
    }

    async fn send_chat_turn(
        &self,
        history: &[ChatMessage],
        context: &AnalysisContext,
    ) -> Result<ChatMessage, ApiError> {
        let request = self.http.post(self.endpoints.chat()).json(&codec::chat_body(history, context));
        codec::decode_chat_reply(&self.read(request).await?)
    }

    async fn list_projects(&self, owner_id: &str) -> Result<Vec<Project>, ApiError> {
        let body = self.read(self.http.get(self.endpoints.projects(owner_id))).await?;
        codec::decode_projects(&body)
    }

    async fn fetch_project_info(&self, owner_id: &str, project_name: &str) -> Result<ProjectInfo, ApiError> {
        let body = self.read(self.http.get(self.endpoints.project_info(owner_id, project_name))).await?;
        codec::decode_project_info(&body, project_name)
    }

    async fn delete_project(&self, owner_id: &str, project_name: &str) -> Result<(), ApiError> {
        self.read(self.http.get(self.endpoints.delete_project(owner_id, project_name))).await.map(|_| ())
    }

    async fn upload_report(&self, owner_id: &str, markdown: &str) -> Result<(), ApiError> {
        let form = to_form(&codec::report_form(owner_id, markdown))?;
        self.read(self.http.post(self.endpoints.upload_report()).multipart(form)).await.map(|_| ())
    }
}
