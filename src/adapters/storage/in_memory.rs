//! In-memory conversation store for tests and ephemeral sessions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, StoreError};

/// Keeps the conversation id for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    current: Arc<Mutex<Option<ConversationId>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `id`.
    pub fn with_id(id: ConversationId) -> Self {
        Self {
            current: Arc::new(Mutex::new(Some(id))),
        }
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get_or_create(&self) -> Result<ConversationId, StoreError> {
        let mut current = self.current.lock().await;
        Ok(*current.get_or_insert_with(ConversationId::new))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.current.lock().await = None;
        Ok(())
    }
}
