//! File-based Conversation Store Adapter
//!
//! Keeps the conversation id as a single line of text so that it survives
//! restarts of the command-line client.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::conversation::{validate_conversation_id, InputLimits};
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, StoreError};

/// File-based storage for the conversation id
#[derive(Debug, Clone)]
pub struct FileConversationStore {
    path: PathBuf,
    limits: InputLimits,
}

impl FileConversationStore {
    /// Create a store backed by the file at `path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileConversationStore::new("./data/conversation_id");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            limits: InputLimits::default(),
        }
    }

    /// Bounds applied to the stored id when it is read back.
    pub fn with_limits(mut self, limits: InputLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<ConversationId>, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => match validate_conversation_id(contents.trim(), &self.limits) {
                Ok(id) => Ok(Some(id)),
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), error = %err, "discarding unreadable conversation id");
                    Ok(None)
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::IoError(err.to_string())),
        }
    }

    async fn write(&self, id: ConversationId) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::IoError(e.to_string()))?;
        }
        fs::write(&self.path, format!("{}\n", id))
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl ConversationStore for FileConversationStore {
    async fn get_or_create(&self) -> Result<ConversationId, StoreError> {
        if let Some(id) = self.read().await? {
            return Ok(id);
        }

        let id = ConversationId::new();
        self.write(id).await?;
        tracing::info!(conversation_id = %id, "created conversation id");
        Ok(id)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::IoError(err.to_string())),
        }
    }
}
