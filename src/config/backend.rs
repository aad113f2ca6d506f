//! Chat backend configuration

use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use super::error::ConfigValidationError;

/// Chat backend (webhook) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Webhook endpoint receiving chat turns
    #[serde(default)]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl BackendConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.url.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired("backend.url"));
        }

        let url = Url::parse(&self.url).map_err(|_| ConfigValidationError::InvalidWebhookUrl)?;
        match url.scheme() {
            "https" => {}
            "http" if !self.is_production() => {}
            "http" => return Err(ConfigValidationError::WebhookMustBeHttps),
            _ => return Err(ConfigValidationError::InvalidWebhookUrl),
        }

        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_timeout(),
            environment: default_environment(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> Environment {
    Environment::Development
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> BackendConfig {
        BackendConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_backend_config_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.is_production());
    }

    #[test]
    fn test_validation_requires_url() {
        assert_eq!(
            config("").validate(),
            Err(ConfigValidationError::MissingRequired("backend.url"))
        );
    }

    #[test]
    fn test_validation_rejects_unparseable_url() {
        assert_eq!(
            config("not a url").validate(),
            Err(ConfigValidationError::InvalidWebhookUrl)
        );
        assert_eq!(
            config("ftp://example.com/hook").validate(),
            Err(ConfigValidationError::InvalidWebhookUrl)
        );
    }

    #[test]
    fn test_http_allowed_outside_production() {
        assert!(config("http://localhost:5678/webhook/bot").validate().is_ok());
    }

    #[test]
    fn test_production_requires_https() {
        let mut config = config("http://example.com/webhook/bot");
        config.environment = Environment::Production;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::WebhookMustBeHttps)
        );

        config.url = "https://example.com/webhook/bot".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let mut config = config("https://example.com/hook");
        config.timeout_secs = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        config.timeout_secs = 500;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }
}
