//! HTTP webhook chat backend.
//!
//! Posts the request as JSON and decodes the `[{"output": ..., "chartData": ...}]`
//! reply body.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

use crate::ports::{BackendError, BackendReply, ChatBackend, ChatRequest};

/// Configuration for the webhook backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Endpoint receiving the POST.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl WebhookConfig {
    /// Creates a configuration with the default 30 second timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Chat backend reached through an HTTP webhook.
#[derive(Debug, Clone)]
pub struct WebhookBackend {
    config: WebhookConfig,
    client: Client,
}

impl WebhookBackend {
    /// Creates the backend and its HTTP client.
    ///
    /// # Errors
    ///
    /// - `Network` if the HTTP client cannot be built
    pub fn new(config: WebhookConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    fn map_send_error(err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::network(format!("connection failed: {}", err))
        } else {
            BackendError::network(err.to_string())
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body_len = body.len(), "webhook returned error status");
        tracing::debug!(%body, "webhook error body");
        Err(BackendError::from_status(status.as_u16()))
    }
}

#[async_trait]
impl ChatBackend for WebhookBackend {
    async fn send(&self, request: &ChatRequest) -> Result<BackendReply, BackendError> {
        tracing::debug!(
            conversation_id = %request.conversation_id,
            history = request.history.len(),
            "posting to webhook"
        );

        let response = self
            .client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::handle_response_status(response).await?;

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::malformed(e.to_string())
            }
        })?;

        BackendReply::from_wire(&body)
    }
}
