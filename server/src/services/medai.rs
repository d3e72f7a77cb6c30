//! Upstream MedAI backend client used by the proxy routes.
//!
//! Requests are forwarded as-is except for the owner identity: every
//! `user_id` (query parameter or form field) is replaced with the session
//! user, so one account can never read or write another's projects.

#[cfg(test)]
#[path = "medai_test.rs"]
mod medai_test;

use std::time::Duration;

use protocol::endpoints::Endpoints;
use protocol::codec::FIELD_USER_ID;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
}

/// One multipart field read from the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxiedValue {
    Text(String),
    File { file_name: String, content_type: Option<String>, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxiedField {
    pub name: String,
    pub value: ProxiedValue,
}

impl ProxiedField {
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: ProxiedValue::Text(value.into()) }
    }
}

/// Replace every `user_id` field with `owner`, adding one when absent.
pub fn force_owner(fields: &mut Vec<ProxiedField>, owner: &str) {
    fields.retain(|field| field.name != FIELD_USER_ID);
    fields.push(ProxiedField::text(FIELD_USER_ID, owner));
}

fn to_form(fields: Vec<ProxiedField>) -> Result<reqwest::multipart::Form, ProxyError> {
    let mut form = reqwest::multipart::Form::new();
    for field in fields {
        form = match field.value {
            ProxiedValue::Text(text) => form.text(field.name, text),
            ProxiedValue::File { file_name, content_type, bytes } => {
                let mut part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
                if let Some(content_type) = content_type {
                    part = part
                        .mime_str(&content_type)
                        .map_err(|_| ProxyError::BadRequest(format!("invalid content type {content_type:?}")))?;
                }
                form.part(field.name, part)
            }
        };
    }
    Ok(form)
}

/// Build the shared HTTP client with the configured upstream timeouts.
///
/// # Errors
///
/// Returns the builder error when the TLS backend cannot initialize.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .connect_timeout(Duration::from_secs(config.upstream_connect_timeout_secs))
        .build()
}

pub struct MedaiUpstream {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl MedaiUpstream {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self { http, endpoints: Endpoints::new(config.medai_api_base_url.clone()) }
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// # Errors
    ///
    /// [`ProxyError::Upstream`] on transport failure. Non-2xx statuses are
    /// returned as responses for the caller to relay.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, ProxyError> {
        tracing::debug!(%url, "proxy GET");
        Ok(self.http.get(url).send().await?)
    }

    /// # Errors
    ///
    /// See [`MedaiUpstream::get`].
    pub async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<reqwest::Response, ProxyError> {
        tracing::debug!(%url, "proxy POST json");
        Ok(self.http.post(url).json(body).send().await?)
    }

    /// Forward a multipart form with the owner forced to `owner`.
    ///
    /// # Errors
    ///
    /// [`ProxyError::BadRequest`] for an unusable file content type, else see
    /// [`MedaiUpstream::get`].
    pub async fn post_form(
        &self,
        url: &str,
        mut fields: Vec<ProxiedField>,
        owner: &str,
    ) -> Result<reqwest::Response, ProxyError> {
        force_owner(&mut fields, owner);
        tracing::debug!(%url, fields = fields.len(), "proxy POST multipart");
        let form = to_form(fields)?;
        Ok(self.http.post(url).multipart(form).send().await?)
    }
}
