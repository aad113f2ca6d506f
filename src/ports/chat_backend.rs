//! Chat backend port - the text-generation service behind the assistant.
//!
//! One call per user turn: the outbound request carries the conversation id,
//! the new message and the history; the reply carries the response text and
//! optionally a structured chart payload.
//!
//! # Example
//!
//! ```ignore
//! let reply = backend.send(&request).await?;
//! let interpreted = orchestrator.interpret(&reply.output, &request.message, reply.chart_payload.as_ref());
//! ```

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::conversation::HistoryEntry;
use crate::domain::foundation::ConversationId;

/// Port for the chat backend.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one user turn and returns the backend's reply.
    async fn send(&self, request: &ChatRequest) -> Result<BackendReply, BackendError>;
}

/// Outbound request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub conversation_id: ConversationId,
    pub message: String,
    pub history: Vec<HistoryEntry>,
}

/// Decoded backend reply.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    /// Response text.
    pub output: String,
    /// Structured chart payload, unvalidated.
    pub chart_payload: Option<Value>,
}

impl BackendReply {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            chart_payload: None,
        }
    }

    pub fn with_chart_payload(mut self, payload: Value) -> Self {
        self.chart_payload = Some(payload);
        self
    }

    /// Decodes the wire body: a non-empty array whose first element holds a
    /// non-empty string `output` and an optional `chartData`.
    ///
    /// # Errors
    ///
    /// - `MalformedResponse` for any other shape
    pub fn from_wire(body: &Value) -> Result<Self, BackendError> {
        let first = body
            .as_array()
            .ok_or_else(|| BackendError::malformed("response is not an array"))?
            .first()
            .ok_or_else(|| BackendError::malformed("response array is empty"))?;

        let output = first
            .get("output")
            .and_then(Value::as_str)
            .ok_or_else(|| BackendError::malformed("first element has no string output"))?;
        if output.trim().is_empty() {
            return Err(BackendError::malformed("output is empty"));
        }

        Ok(Self {
            output: output.to_string(),
            chart_payload: first.get("chartData").filter(|v| !v.is_null()).cloned(),
        })
    }
}

/// Transport failures, mapped to user-safe sentences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Request exceeded the timeout.
    #[error("request timed out")]
    Timeout,

    /// 5xx from the backend.
    #[error("server error: status {status}")]
    Server { status: u16 },

    /// 404 from the backend.
    #[error("endpoint not found")]
    NotFound,

    /// 401 or 403 from the backend.
    #[error("access denied: status {status}")]
    AccessDenied { status: u16 },

    /// Any other non-2xx status.
    #[error("request rejected: status {status}")]
    Rejected { status: u16 },

    /// Body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Connection or protocol failure.
    #[error("network error: {0}")]
    Network(String),

    /// The user abandoned the pending request.
    #[error("request cancelled")]
    Cancelled,
}

impl BackendError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        BackendError::MalformedResponse(reason.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        BackendError::Network(message.into())
    }

    /// Maps a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => BackendError::NotFound,
            401 | 403 => BackendError::AccessDenied { status },
            500..=599 => BackendError::Server { status },
            _ => BackendError::Rejected { status },
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout)
    }

    /// Finished sentence shown in the transcript. Never includes server
    /// bodies.
    pub fn user_message(&self) -> &'static str {
        match self {
            BackendError::Timeout => "Tempo de espera esgotado. Tente novamente.",
            BackendError::Server { .. } => "Erro no servidor. Tente novamente mais tarde.",
            BackendError::NotFound => "Endpoint não encontrado.",
            BackendError::AccessDenied { .. } => "Acesso negado.",
            BackendError::Rejected { .. } => "Erro ao processar requisição. Tente novamente.",
            BackendError::MalformedResponse(_) => "Resposta do servidor em formato inválido.",
            BackendError::Network(_) => {
                "Ocorreu um erro ao comunicar com o servidor. Tente novamente."
            }
            BackendError::Cancelled => "Requisição cancelada.",
        }
    }
}
