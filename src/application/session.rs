//! ChatSession - the single owner of a conversation's mutable state.
//!
//! The session holds the transcript, the pending-request flag, the rate
//! limiter and the extraction orchestrator. Every mutation goes through
//! `&mut self`, so one session is driven by one task at a time.
//!
//! A turn is split in two so callers can run the backend call however they
//! like (inline, under `select!`, on another task):
//!
//! ```ignore
//! let turn = session.begin_turn("Mostre um gráfico dos investimentos")?;
//! let reply = backend.send(turn.request()).await;
//! let bot = session.complete_turn(turn, reply)?;
//! ```
//!
//! `send` does both steps against the session's own backend.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::chart::{ChartKind, ChartSpec, ExtractionOrchestrator, PresentationError};
use crate::domain::conversation::{
    sanitize_text, validate_history, validate_message, HistoryEntry, InputError, InputLimits,
    Message,
};
use crate::domain::foundation::{ConversationId, MessageId};
use crate::ports::{
    BackendError, BackendReply, ChatBackend, ChatRequest, RateLimitDenied, RateLimitKey,
    RateLimiter,
};

/// Default time allowed for one backend call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a message was not sent. The matching error turn is already in the
/// transcript when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    RateLimited(#[from] RateLimitDenied),
}

impl Rejection {
    /// Returns the sentence shown in the error turn.
    pub fn user_message(&self) -> String {
        match self {
            Rejection::Input(err) => err.user_message(),
            Rejection::RateLimited(denied) => denied.user_message(),
        }
    }
}

/// Errors returned by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A request is already in flight")]
    Busy,

    #[error("Message rejected: {0}")]
    Rejected(Rejection),

    #[error("No request is pending")]
    NothingPending,

    #[error("Turn for message {0} is no longer pending")]
    StaleTurn(MessageId),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    #[error(transparent)]
    Presentation(#[from] PresentationError),
}

/// An accepted user turn awaiting the backend's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    user_message_id: MessageId,
    request: ChatRequest,
}

impl PendingTurn {
    /// Id of the user message that started the turn.
    pub fn user_message_id(&self) -> &MessageId {
        &self.user_message_id
    }

    /// Outbound request to hand to the backend.
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// Conversation actor.
pub struct ChatSession {
    conversation_id: ConversationId,
    messages: Vec<Message>,
    pending: Option<MessageId>,
    backend: Arc<dyn ChatBackend>,
    rate_limiter: Box<dyn RateLimiter>,
    orchestrator: ExtractionOrchestrator,
    limits: InputLimits,
    request_timeout: Duration,
}

impl ChatSession {
    /// Creates a session with default limits and timeout.
    pub fn new(
        conversation_id: ConversationId,
        backend: Arc<dyn ChatBackend>,
        rate_limiter: Box<dyn RateLimiter>,
        orchestrator: ExtractionOrchestrator,
    ) -> Self {
        Self {
            conversation_id,
            messages: Vec::new(),
            pending: None,
            backend,
            rate_limiter,
            orchestrator,
            limits: InputLimits::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_limits(mut self, limits: InputLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    /// Transcript in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn find_message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id() == id)
    }

    /// Most recent bot turn, if any.
    pub fn last_bot_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| !m.is_user())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Turns
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates and admits a user message, returning the outbound request.
    ///
    /// # Errors
    ///
    /// - `Busy` if a request is in flight; the transcript is untouched
    /// - `Rejected` if validation or admission fails; an error turn is appended
    pub fn begin_turn(&mut self, content: &str) -> Result<PendingTurn, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::Busy);
        }

        if let Err(err) = validate_message(content, &self.limits) {
            return Err(self.reject(err.into()));
        }

        let key = RateLimitKey::conversation(&self.conversation_id);
        if let Err(denied) = self.rate_limiter.check(&key).into_result() {
            warn!(
                conversation_id = %self.conversation_id,
                retry_after_secs = denied.retry_after_secs(),
                "Rate limit exceeded"
            );
            return Err(self.reject(denied.into()));
        }

        let user_message = Message::user(content);
        let user_message_id = *user_message.id();
        self.messages.push(user_message);

        let history = self.outbound_history();
        if let Err(err) = validate_history(&history, &self.limits) {
            return Err(self.reject(err.into()));
        }

        let request = ChatRequest {
            conversation_id: self.conversation_id,
            message: sanitize_text(content),
            history,
        };
        self.pending = Some(user_message_id);

        info!(
            conversation_id = %self.conversation_id,
            message_id = %user_message_id,
            history_len = request.history.len(),
            "Turn started"
        );

        Ok(PendingTurn {
            user_message_id,
            request,
        })
    }

    /// Records the backend's outcome for a pending turn and returns the
    /// appended bot message.
    ///
    /// # Errors
    ///
    /// - `StaleTurn` if the turn was cancelled or the transcript cleared
    pub fn complete_turn(
        &mut self,
        turn: PendingTurn,
        outcome: Result<BackendReply, BackendError>,
    ) -> Result<&Message, SessionError> {
        if self.pending != Some(turn.user_message_id) {
            return Err(SessionError::StaleTurn(turn.user_message_id));
        }
        self.pending = None;

        let message = match outcome {
            Ok(reply) => {
                let output = sanitize_text(&reply.output);
                let interpreted = self.orchestrator.interpret(
                    &output,
                    &turn.request.message,
                    reply.chart_payload.as_ref(),
                );
                info!(
                    conversation_id = %self.conversation_id,
                    chart_state = ?interpreted.presentation.state(),
                    "Turn completed"
                );
                Message::bot_with_chart(interpreted.content, interpreted.presentation)
            }
            Err(err) => {
                warn!(
                    conversation_id = %self.conversation_id,
                    error = %err,
                    "Backend call failed"
                );
                Message::error_turn(err.user_message())
            }
        };

        Ok(self.push(message))
    }

    /// Sends a user message through the session's backend.
    ///
    /// The call is bounded by the request timeout; expiry is reported like
    /// any other timeout.
    pub async fn send(&mut self, content: &str) -> Result<&Message, SessionError> {
        let turn = self.begin_turn(content)?;
        let backend = Arc::clone(&self.backend);

        let outcome = match timeout(self.request_timeout, backend.send(turn.request())).await {
            Ok(outcome) => outcome,
            Err(_) => Err(BackendError::Timeout),
        };

        self.complete_turn(turn, outcome)
    }

    /// Abandons the in-flight request and appends the cancellation turn.
    ///
    /// # Errors
    ///
    /// - `NothingPending` if no request is in flight
    pub fn cancel_pending(&mut self) -> Result<&Message, SessionError> {
        let Some(message_id) = self.pending.take() else {
            return Err(SessionError::NothingPending);
        };
        info!(
            conversation_id = %self.conversation_id,
            message_id = %message_id,
            "Turn cancelled"
        );
        Ok(self.push(Message::error_turn(BackendError::Cancelled.user_message())))
    }

    /// Drops the transcript and any pending turn. The conversation id is kept.
    pub fn clear(&mut self) {
        info!(
            conversation_id = %self.conversation_id,
            dropped = self.messages.len(),
            "Transcript cleared"
        );
        self.messages.clear();
        self.pending = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chart transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Accepts the chart suggestion on a message.
    pub fn visualize(&mut self, message_id: &MessageId) -> Result<&Message, SessionError> {
        let message = self.message_mut(message_id)?;
        message.visualize()?;
        Ok(&*message)
    }

    /// Renders a message's chart as `kind`.
    pub fn select_chart_kind(
        &mut self,
        message_id: &MessageId,
        kind: ChartKind,
    ) -> Result<&ChartSpec, SessionError> {
        let message = self.message_mut(message_id)?;
        Ok(message.select_chart_kind(kind)?)
    }

    /// Goes back from a rendered chart to the style picker.
    pub fn reopen_chart_options(&mut self, message_id: &MessageId) -> Result<&Message, SessionError> {
        let message = self.message_mut(message_id)?;
        message.reopen_chart_options()?;
        Ok(&*message)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn message_mut(&mut self, id: &MessageId) -> Result<&mut Message, SessionError> {
        self.messages
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or(SessionError::MessageNotFound(*id))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    fn reject(&mut self, rejection: Rejection) -> SessionError {
        debug!(
            conversation_id = %self.conversation_id,
            reason = %rejection,
            "Message rejected"
        );
        self.push(Message::error_turn(rejection.user_message()));
        SessionError::Rejected(rejection)
    }

    /// Most recent transcript entries, sanitized, capped at the history limit.
    fn outbound_history(&self) -> Vec<HistoryEntry> {
        let skip = self
            .messages
            .len()
            .saturating_sub(self.limits.max_history_length);
        self.messages
            .iter()
            .skip(skip)
            .map(Message::to_history_entry)
            .map(|entry| HistoryEntry {
                content: sanitize_text(&entry.content),
                ..entry
            })
            .collect()
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("conversation_id", &self.conversation_id)
            .field("messages", &self.messages.len())
            .field("pending", &self.pending)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
