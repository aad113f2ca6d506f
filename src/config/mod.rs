//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHART_ASSISTANT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use chart_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Webhook: {}", config.backend.url);
//! ```

mod backend;
mod error;
mod storage;

pub use backend::{BackendConfig, Environment};
pub use error::{ConfigError, ConfigValidationError};
pub use storage::StorageConfig;

use serde::Deserialize;

use crate::adapters::rate_limiter::RateLimitConfig;
use crate::domain::chart::ChartPolicy;
use crate::domain::conversation::InputLimits;

/// Root application configuration
///
/// Every section has defaults except the webhook URL, which `validate`
/// requires. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Chat backend configuration (webhook URL, timeout, environment)
    #[serde(default)]
    pub backend: BackendConfig,

    /// Input size limits
    #[serde(default)]
    pub limits: InputLimits,

    /// Outbound request quota
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Chart extraction heuristics
    #[serde(default)]
    pub charts: ChartPolicy,

    /// Conversation id persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHART_ASSISTANT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHART_ASSISTANT__BACKEND__URL=...` -> `backend.url = ...`
    /// - `CHART_ASSISTANT__RATE_LIMIT__MAX_REQUESTS=20` -> `rate_limit.max_requests = 20`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHART_ASSISTANT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.backend.validate()?;
        validate_limits(&self.limits)?;
        validate_rate_limit(&self.rate_limit)?;
        validate_charts(&self.charts)?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.backend.is_production()
    }
}

fn default_log_level() -> String {
    "info,chart_assistant=debug".to_string()
}

fn validate_limits(limits: &InputLimits) -> Result<(), ConfigValidationError> {
    if limits.max_message_length == 0 {
        return Err(ConfigValidationError::InvalidLimit("max_message_length"));
    }
    if limits.max_history_length == 0 {
        return Err(ConfigValidationError::InvalidLimit("max_history_length"));
    }
    if limits.max_conversation_id_length == 0 {
        return Err(ConfigValidationError::InvalidLimit(
            "max_conversation_id_length",
        ));
    }
    Ok(())
}

fn validate_rate_limit(rate_limit: &RateLimitConfig) -> Result<(), ConfigValidationError> {
    if rate_limit.max_requests == 0 || rate_limit.window_secs == 0 {
        return Err(ConfigValidationError::InvalidRateLimit);
    }
    Ok(())
}

fn validate_charts(charts: &ChartPolicy) -> Result<(), ConfigValidationError> {
    if charts.intent_keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(ConfigValidationError::EmptyIntentVocabulary);
    }

    let fields = &charts.fields;
    for (name, value) in [
        ("temporal_x", &fields.temporal_x),
        ("categorical_x", &fields.categorical_x),
        ("value", &fields.value),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFieldName(name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var(
            "CHART_ASSISTANT__BACKEND__URL",
            "https://hooks.example.com/webhook/bot",
        );
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("CHART_ASSISTANT__BACKEND__URL");
        env::remove_var("CHART_ASSISTANT__BACKEND__ENVIRONMENT");
        env::remove_var("CHART_ASSISTANT__BACKEND__TIMEOUT_SECS");
        env::remove_var("CHART_ASSISTANT__RATE_LIMIT__MAX_REQUESTS");
        env::remove_var("CHART_ASSISTANT__CHARTS__PIE_MAX_ROWS");
        env::remove_var("CHART_ASSISTANT__LOG_LEVEL");
    }

    fn valid_config() -> AppConfig {
        AppConfig {
            backend: BackendConfig {
                url: "https://hooks.example.com/webhook/bot".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    mod loading {
        use super::*;

        #[test]
        fn test_load_from_environment() {
            let _guard = ENV_MUTEX.lock().unwrap();
            set_minimal_env();
            let result = AppConfig::load();
            clear_env();

            assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
            let config = result.unwrap();
            assert_eq!(config.backend.url, "https://hooks.example.com/webhook/bot");
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_section_defaults() {
            let _guard = ENV_MUTEX.lock().unwrap();
            set_minimal_env();
            let result = AppConfig::load();
            clear_env();

            let config = result.unwrap();
            assert_eq!(config.backend.timeout_secs, 30);
            assert_eq!(config.backend.environment, Environment::Development);
            assert_eq!(config.limits, InputLimits::default());
            assert_eq!(config.rate_limit, RateLimitConfig::default());
            assert_eq!(config.charts, ChartPolicy::default());
            assert_eq!(config.log_level, "info,chart_assistant=debug");
        }

        #[test]
        fn test_nested_overrides() {
            let _guard = ENV_MUTEX.lock().unwrap();
            set_minimal_env();
            env::set_var("CHART_ASSISTANT__RATE_LIMIT__MAX_REQUESTS", "20");
            env::set_var("CHART_ASSISTANT__CHARTS__PIE_MAX_ROWS", "4");
            env::set_var("CHART_ASSISTANT__BACKEND__TIMEOUT_SECS", "10");
            let result = AppConfig::load();
            clear_env();

            let config = result.unwrap();
            assert_eq!(config.rate_limit.max_requests, 20);
            assert_eq!(config.rate_limit.window_secs, 60);
            assert_eq!(config.charts.pie_max_rows, 4);
            assert_eq!(config.backend.timeout_secs, 10);
        }

        #[test]
        fn test_is_production() {
            let _guard = ENV_MUTEX.lock().unwrap();
            set_minimal_env();
            env::set_var("CHART_ASSISTANT__BACKEND__ENVIRONMENT", "production");
            let result = AppConfig::load();
            clear_env();

            let config = result.unwrap();
            assert!(config.is_production());
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_valid_config_passes() {
            assert!(valid_config().validate().is_ok());
        }

        #[test]
        fn test_missing_url_fails() {
            assert_eq!(
                AppConfig::default().validate(),
                Err(ConfigValidationError::MissingRequired("backend.url"))
            );
        }

        #[test]
        fn test_zero_rate_limit_fails() {
            let mut config = valid_config();
            config.rate_limit.max_requests = 0;
            assert_eq!(
                config.validate(),
                Err(ConfigValidationError::InvalidRateLimit)
            );

            let mut config = valid_config();
            config.rate_limit.window_secs = 0;
            assert_eq!(
                config.validate(),
                Err(ConfigValidationError::InvalidRateLimit)
            );
        }

        #[test]
        fn test_zero_limits_fail() {
            let mut config = valid_config();
            config.limits.max_history_length = 0;
            assert_eq!(
                config.validate(),
                Err(ConfigValidationError::InvalidLimit("max_history_length"))
            );
        }

        #[test]
        fn test_empty_intent_vocabulary_fails() {
            let mut config = valid_config();
            config.charts.intent_keywords = vec![" ".to_string()];
            assert_eq!(
                config.validate(),
                Err(ConfigValidationError::EmptyIntentVocabulary)
            );
        }

        #[test]
        fn test_empty_field_name_fails() {
            let mut config = valid_config();
            config.charts.fields.value = String::new();
            assert_eq!(
                config.validate(),
                Err(ConfigValidationError::EmptyFieldName("value"))
            );
        }
    }
}
