//! Conversation Store Port - persistence of the conversation identifier.
//!
//! A client keeps one conversation id across runs and discards it when the
//! user starts over.

use async_trait::async_trait;

use crate::domain::foundation::ConversationId;

/// Errors that can occur during conversation store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting the conversation id
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the stored id, creating and storing a new one if absent
    async fn get_or_create(&self) -> Result<ConversationId, StoreError>;

    /// Forgets the stored id; the next `get_or_create` yields a new one
    async fn clear(&self) -> Result<(), StoreError>;
}
