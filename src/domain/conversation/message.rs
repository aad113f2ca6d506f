//! Transcript messages.
//!
//! A message's id, role, content and creation time never change. Only the
//! chart presentation moves, through the transitions on `ChartPresentation`.

use serde::{Deserialize, Serialize};

use crate::domain::chart::{ChartKind, ChartPresentation, ChartSpec, PresentationError};
use crate::domain::foundation::{MessageId, Timestamp};

/// Prefix marking synthetic error turns.
pub const ERROR_PREFIX: &str = "❌ ";

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person using the assistant.
    User,
    /// The chat backend, or the client speaking for it on errors.
    Bot,
}

/// `(role, content)` pair sent to the backend as conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One turn in the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    created_at: Timestamp,
    #[serde(default)]
    presentation: ChartPresentation,
    #[serde(default)]
    error: bool,
}

impl Message {
    fn new(role: Role, content: String, presentation: ChartPresentation, error: bool) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content,
            created_at: Timestamp::now(),
            presentation,
            error,
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), ChartPresentation::None, false)
    }

    /// Creates a bot turn without a chart.
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content.into(), ChartPresentation::None, false)
    }

    /// Creates a bot turn carrying a chart presentation.
    pub fn bot_with_chart(content: impl Into<String>, presentation: ChartPresentation) -> Self {
        Self::new(Role::Bot, content.into(), presentation, false)
    }

    /// Creates a synthetic bot turn reporting an error.
    pub fn error_turn(text: impl AsRef<str>) -> Self {
        let content = format!("{}{}", ERROR_PREFIX, text.as_ref());
        Self::new(Role::Bot, content, ChartPresentation::None, true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn presentation(&self) -> &ChartPresentation {
        &self.presentation
    }

    /// Returns true for synthetic error turns.
    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns the `(role, content)` pair sent as history.
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry::new(self.role, self.content.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chart transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Accepts the chart suggestion.
    pub fn visualize(&mut self) -> Result<(), PresentationError> {
        self.presentation.visualize()
    }

    /// Renders the chart as `kind`.
    pub fn select_chart_kind(&mut self, kind: ChartKind) -> Result<&ChartSpec, PresentationError> {
        self.presentation.select_kind(kind)
    }

    /// Returns the rendered chart to the kind picker.
    pub fn reopen_chart_options(&mut self) -> Result<(), PresentationError> {
        self.presentation.reopen_options()
    }
}
