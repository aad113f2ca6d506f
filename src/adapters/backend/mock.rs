//! Mock chat backend for testing.
//!
//! Replies are consumed in order; once the queue is empty a plain default
//! reply is returned. Calls are recorded for verification.
//!
//! # Example
//!
//! ```ignore
//! let backend = MockBackend::new()
//!     .with_reply("- Junho: 10\n- Julho: 20")
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{BackendError, BackendReply, ChatBackend, ChatRequest};

/// Mock backend with queued replies, optional latency and call tracking.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    replies: Arc<Mutex<VecDeque<Result<BackendReply, BackendError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a text reply.
    pub fn with_reply(self, output: impl Into<String>) -> Self {
        self.push(Ok(BackendReply::new(output)))
    }

    /// Queues a text reply carrying a structured chart payload.
    pub fn with_chart_reply(self, output: impl Into<String>, payload: Value) -> Self {
        self.push(Ok(BackendReply::new(output).with_chart_payload(payload)))
    }

    /// Queues an error.
    pub fn with_error(self, error: BackendError) -> Self {
        self.push(Err(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn push(self, reply: Result<BackendReply, BackendError>) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    fn next_reply(&self) -> Result<BackendReply, BackendError> {
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Ok(BackendReply::new("Mock response")))
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn send(&self, request: &ChatRequest) -> Result<BackendReply, BackendError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ConversationId;
    use serde_json::json;

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            conversation_id: ConversationId::new(),
            message: message.into(),
            history: Vec::new(),
        }
    }

    #[tokio::test]
    async fn replies_in_order_then_default() {
        let backend = MockBackend::new()
            .with_reply("um")
            .with_error(BackendError::NotFound);

        assert_eq!(backend.send(&request("a")).await.unwrap().output, "um");
        assert_eq!(backend.send(&request("b")).await, Err(BackendError::NotFound));
        assert_eq!(backend.send(&request("c")).await.unwrap().output, "Mock response");
    }

    #[tokio::test]
    async fn chart_replies_carry_payload() {
        let backend = MockBackend::new().with_chart_reply("ok", json!({"type": "bar"}));
        let reply = backend.send(&request("a")).await.unwrap();
        assert_eq!(reply.chart_payload, Some(json!({"type": "bar"})));
    }

    #[tokio::test]
    async fn records_calls() {
        let backend = MockBackend::new();
        backend.send(&request("primeira")).await.unwrap();
        backend.send(&request("segunda")).await.unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(backend.calls()[1].message, "segunda");
    }

    #[tokio::test]
    async fn clones_share_state() {
        let backend = MockBackend::new().with_reply("compartilhada");
        let clone = backend.clone();
        assert_eq!(clone.send(&request("a")).await.unwrap().output, "compartilhada");
        assert_eq!(backend.call_count(), 1);
    }
}
