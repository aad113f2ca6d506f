//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid webhook URL format")]
    InvalidWebhookUrl,

    #[error("Webhook URL must use HTTPS in production")]
    WebhookMustBeHttps,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Rate limit quota and window must be non-zero")]
    InvalidRateLimit,

    #[error("Input limit '{0}' must be non-zero")]
    InvalidLimit(&'static str),

    #[error("Chart intent vocabulary is empty")]
    EmptyIntentVocabulary,

    #[error("Chart field name '{0}' is empty")]
    EmptyFieldName(&'static str),
}
