//! Shared HTTP client for the Framely admin API.
//!
//! Provides a minimal client that attaches the session bearer token, generic
//! GET/POST/PUT/DELETE helpers, and the campaign, frame and poster calls
//! (see [`api`]). [`ApiClient`] implements [`framely_core::ResourceClient`], so
//! the composition orchestrator drives it directly.

pub mod api;

use framely_core::constants::API_PREFIX;
use framely_core::{ApiError, ConsoleConfig, Session};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Longest raw (non-JSON) error body echoed back to the user.
const MAX_RAW_ERROR_LEN: usize = 200;

/// Admin API path, e.g. `api_path("/campaigns/")` -> `/api/admin/campaigns/`.
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// HTTP client for the admin API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Option<Session>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn from_config(config: &ConsoleConfig, session: Option<Session>) -> Result<Self, ApiError> {
        Self::new(config.api_url.clone(), config.request_timeout, session)
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => request.header(AUTHORIZATION, session.authorization_header()),
            None => request,
        }
    }

    /// Send a request and turn non-success statuses into [`ApiError::Rejected`].
    ///
    /// A 401 is forwarded to the session's auth-failure handler before the
    /// error is returned.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.apply_auth(request).send().await.map_err(request_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = rejection_message(status, &body);

        if status == StatusCode::UNAUTHORIZED {
            if let Some(session) = &self.session {
                session.notify_auth_failure();
            }
        }

        tracing::debug!(status = status.as_u16(), %message, "API request rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json().await.map_err(|e| {
            if e.is_decode() {
                ApiError::Decode(e.to_string())
            } else {
                request_error(e)
            }
        })
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let mut request = self.client.get(self.build_url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST json");
        let request = self.client.post(self.build_url(path)).json(body);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST multipart");
        let request = self.client.post(self.build_url(path)).multipart(form);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// POST multipart form; the response body is not read.
    pub async fn post_multipart_ignore_body(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(), ApiError> {
        tracing::debug!(path, "POST multipart");
        let request = self.client.post(self.build_url(path)).multipart(form);
        self.send(request).await?;
        Ok(())
    }

    /// PUT multipart form and deserialize response.
    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "PUT multipart");
        let request = self.client.put(self.build_url(path)).multipart(form);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// DELETE request. Returns Ok(()) on success.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!(path, "DELETE");
        let request = self.client.delete(self.build_url(path));
        self.send(request).await?;
        Ok(())
    }
}

fn request_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::InvalidRequest(err.to_string())
    } else if err.is_timeout() {
        ApiError::Transport(format!("Request timed out: {}", err))
    } else {
        ApiError::Transport(err.to_string())
    }
}

/// Message to show for a rejected request.
///
/// Uses the `error` (or `detail`/`message`) field of a JSON body, then a short
/// plain-text body, then the status reason.
pub fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "detail", "message"] {
            if let Some(serde_json::Value::String(message)) = map.get(key) {
                if !message.trim().is_empty() {
                    return message.trim().to_string();
                }
            }
        }
    }

    let text = body.trim();
    if !text.is_empty()
        && !text.starts_with('<')
        && !text.starts_with('{')
        && text.len() <= MAX_RAW_ERROR_LEN
    {
        return text.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("Request failed with status {} {}", status.as_u16(), reason),
        None => format!("Request failed with status {}", status.as_u16()),
    }
}
