//! Conversation transcript: messages, history and input rules.

mod message;
mod validation;

pub use message::{HistoryEntry, Message, Role, ERROR_PREFIX};
pub use validation::{
    sanitize_text, validate_conversation_id, validate_history, validate_message, InputError,
    InputLimits,
};
