//! Input validation and sanitization applied before any network call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HistoryEntry;
use crate::domain::foundation::ConversationId;

/// Size limits on outbound input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Maximum characters in one message.
    pub max_message_length: usize,
    /// Maximum entries in the history sent with a message.
    pub max_history_length: usize,
    /// Maximum characters in a conversation id.
    pub max_conversation_id_length: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_message_length: 10_000,
            max_history_length: 100,
            max_conversation_id_length: 100,
        }
    }
}

/// Rejected input. Surfaced to the user as an error turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("message has {actual} characters, maximum is {max}")]
    MessageTooLong { max: usize, actual: usize },

    #[error("conversation id has {actual} characters, maximum is {max}")]
    ConversationIdTooLong { max: usize, actual: usize },

    #[error("conversation id is not a hyphenated UUID")]
    MalformedConversationId,

    #[error("history has {actual} entries, maximum is {max}")]
    HistoryTooLong { max: usize, actual: usize },
}

impl InputError {
    /// Finished sentence shown in the transcript.
    pub fn user_message(&self) -> String {
        match self {
            InputError::EmptyMessage => "Mensagem não pode estar vazia.".to_string(),
            InputError::MessageTooLong { max, .. } => {
                format!("Mensagem muito longa. Máximo de {} caracteres.", max)
            }
            InputError::ConversationIdTooLong { .. } => "ConversationId muito longo.".to_string(),
            InputError::MalformedConversationId => {
                "ConversationId em formato inválido.".to_string()
            }
            InputError::HistoryTooLong { max, .. } => {
                format!("Histórico muito longo. Máximo de {} mensagens.", max)
            }
        }
    }
}

/// Checks that a message is non-blank and within the length limit.
pub fn validate_message(message: &str, limits: &InputLimits) -> Result<(), InputError> {
    if message.trim().is_empty() {
        return Err(InputError::EmptyMessage);
    }
    let actual = message.chars().count();
    if actual > limits.max_message_length {
        return Err(InputError::MessageTooLong {
            max: limits.max_message_length,
            actual,
        });
    }
    Ok(())
}

/// Parses a conversation id received from outside the process.
pub fn validate_conversation_id(
    raw: &str,
    limits: &InputLimits,
) -> Result<ConversationId, InputError> {
    let actual = raw.chars().count();
    if actual > limits.max_conversation_id_length {
        return Err(InputError::ConversationIdTooLong {
            max: limits.max_conversation_id_length,
            actual,
        });
    }
    ConversationId::parse(raw).map_err(|_| InputError::MalformedConversationId)
}

/// Checks the history length and every entry's content.
pub fn validate_history(history: &[HistoryEntry], limits: &InputLimits) -> Result<(), InputError> {
    if history.len() > limits.max_history_length {
        return Err(InputError::HistoryTooLong {
            max: limits.max_history_length,
            actual: history.len(),
        });
    }
    history
        .iter()
        .try_for_each(|entry| validate_message(&entry.content, limits))
}

/// Removes control characters other than `\n` and `\r`, then trims.
pub fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string()
}
