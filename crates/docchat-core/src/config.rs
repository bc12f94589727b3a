//! Client configuration model.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{DocchatError, Result};

pub const DEFAULT_CORE_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_AUTH_API_URL: &str = "http://localhost:8000/auth";
pub const DEFAULT_LLM_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_HISTORY_API_URL: &str = "http://localhost:8000/api";

pub const DEFAULT_SESSION_LIFETIME_HOURS: i64 = 24;
/// Upper bound for `session_lifetime_hours` (ten years).
pub const MAX_SESSION_LIFETIME_HOURS: i64 = 24 * 366 * 10;

/// Base URLs of the four remote collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub core_api_url: String,
    pub auth_api_url: String,
    pub llm_api_url: String,
    pub history_api_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            core_api_url: DEFAULT_CORE_API_URL.to_string(),
            auth_api_url: DEFAULT_AUTH_API_URL.to_string(),
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            history_api_url: DEFAULT_HISTORY_API_URL.to_string(),
        }
    }
}

/// Values recorded on every persisted prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptDefaults {
    pub model_name: String,
    pub temperature: f64,
    pub token_usage: u32,
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self {
            model_name: "llama3.2:latest".to_string(),
            temperature: 1.0,
            token_usage: 100,
        }
    }
}

/// Root of `config.toml`.
///
/// ```toml
/// request_timeout_secs = 60
/// session_lifetime_hours = 24
///
/// [endpoints]
/// core_api_url = "http://localhost:8000/api"
///
/// [prompt]
/// model_name = "llama3.2:latest"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoints: EndpointConfig,
    pub request_timeout_secs: u64,
    /// How long a cached sign-in stays valid.
    pub session_lifetime_hours: i64,
    pub prompt: PromptDefaults,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            request_timeout_secs: 60,
            session_lifetime_hours: DEFAULT_SESSION_LIFETIME_HOURS,
            prompt: PromptDefaults::default(),
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    /// The cached sign-in lifetime; out-of-range values fall back to the default.
    pub fn session_lifetime(&self) -> Duration {
        Some(self.session_lifetime_hours)
            .filter(|hours| (1..=MAX_SESSION_LIFETIME_HOURS).contains(hours))
            .and_then(Duration::try_hours)
            .unwrap_or_else(|| Duration::hours(DEFAULT_SESSION_LIFETIME_HOURS))
    }

    /// Rejects values that cannot be used as-is.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SESSION_LIFETIME_HOURS).contains(&self.session_lifetime_hours) {
            return Err(DocchatError::config(format!(
                "session_lifetime_hours must be between 1 and {} (got {})",
                MAX_SESSION_LIFETIME_HOURS, self.session_lifetime_hours
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(DocchatError::config("request_timeout_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            request_timeout_secs = 5

            [endpoints]
            llm_api_url = "http://llm.internal"
            "#,
        )
        .unwrap();

        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.endpoints.llm_api_url, "http://llm.internal");
        assert_eq!(config.endpoints.core_api_url, DEFAULT_CORE_API_URL);
        assert_eq!(config.session_lifetime(), Duration::hours(24));
        assert_eq!(config.prompt.model_name, "llama3.2:latest");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_session_lifetime_is_rejected_and_clamped() {
        let config: ClientConfig = toml::from_str("session_lifetime_hours = 10000000000").unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, DocchatError::Config(_)));
        assert_eq!(config.session_lifetime(), Duration::hours(24));
    }

    #[test]
    fn test_non_positive_session_lifetime_is_rejected() {
        let config = ClientConfig {
            session_lifetime_hours: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.session_lifetime(), Duration::hours(24));
    }
}
