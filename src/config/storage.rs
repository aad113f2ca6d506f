//! Conversation id storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ConfigValidationError;

/// Where the conversation id is kept between runs
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path of the file holding the conversation id
    #[serde(default = "default_path")]
    pub conversation_id_path: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.conversation_id_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "storage.conversation_id_path",
            ));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            conversation_id_path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from(".chart-assistant/conversation_id")
}
