//! Configuration System
//!
//! Layered configuration for the repository file system: where the repository lives,
//! how the contents API is reached, how change notifications are batched, and how
//! logging is set up.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::notifier::NotifierConfig;
use crate::repository::RepositoryUrl;
use serde::{Deserialize, Serialize};

pub use crate::remote::RemoteConfig;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoFsConfig {
    /// Contents API settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Change batching settings
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Remote(String),
    Notifier(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Remote(msg) => write!(f, "Remote: {}", msg),
            ValidationError::Notifier(msg) => write!(f, "Notifier: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl RepoFsConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        match (&self.remote.api_base, &self.remote.repository_url) {
            (None, None) => errors.push(ValidationError::Remote(
                "either repository_url or api_base must be set".to_string(),
            )),
            (Some(api_base), _) if !is_http_url(api_base) => errors.push(
                ValidationError::Remote(format!("api_base is not an http(s) URL: {}", api_base)),
            ),
            (None, Some(url)) => {
                if let Err(e) = RepositoryUrl::parse(url) {
                    errors.push(ValidationError::Remote(e.to_string()));
                }
            }
            _ => {}
        }

        if self.remote.request_timeout_secs == Some(0) {
            errors.push(ValidationError::Remote(
                "request_timeout_secs must be positive when set".to_string(),
            ));
        }

        if self.notifier.debounce_ms == 0 {
            errors.push(ValidationError::Notifier(
                "debounce_ms must be positive".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Contents API base: the explicit override, or one derived from the repository URL
    pub fn api_base(&self) -> Result<String, ConfigError> {
        if let Some(api_base) = &self.remote.api_base {
            return Ok(api_base.trim_end_matches('/').to_string());
        }
        let url = self.remote.repository_url.as_deref().ok_or_else(|| {
            ConfigError::Invalid("no repository_url or api_base configured".to_string())
        })?;
        Ok(RepositoryUrl::parse(url)?.api_base())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
