//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `config.toml` in the docchat config directory
//! (or an explicit path) and applies `DOCCHAT_*_URL` environment overrides.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use docchat_core::config::ClientConfig;
use docchat_core::error::Result;

use crate::paths::DocchatPaths;

pub const CORE_API_URL_ENV: &str = "DOCCHAT_CORE_API_URL";
pub const AUTH_API_URL_ENV: &str = "DOCCHAT_AUTH_API_URL";
pub const LLM_API_URL_ENV: &str = "DOCCHAT_LLM_API_URL";
pub const HISTORY_API_URL_ENV: &str = "DOCCHAT_HISTORY_API_URL";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; the platform default is used when `None`.
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading from a custom file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file yields defaults. Environment overrides are applied on
    /// every load.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let cached = self.config.read().unwrap_or_else(|p| p.into_inner());
            if let Some(ref config) = *cached {
                return Ok(config.clone());
            }
        }

        let mut loaded = self.load_file()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut cached = self.config.write().unwrap_or_else(|p| p.into_inner());
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(|p| p.into_inner());
        *cached = None;
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => DocchatPaths::config_file(),
        }
    }

    fn load_file(&self) -> Result<ClientConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        if let Err(e) = config.validate() {
            tracing::error!(path = %path.display(), error = %e, "Invalid configuration");
            return Err(e);
        }
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Overrides collaborator URLs from the environment.
///
/// Empty values are ignored.
pub fn apply_env_overrides(config: &mut ClientConfig, lookup: impl Fn(&str) -> Option<String>) {
    let endpoints = &mut config.endpoints;
    let targets = [
        (CORE_API_URL_ENV, &mut endpoints.core_api_url),
        (AUTH_API_URL_ENV, &mut endpoints.auth_api_url),
        (LLM_API_URL_ENV, &mut endpoints.llm_api_url),
        (HISTORY_API_URL_ENV, &mut endpoints.history_api_url),
    ];

    for (key, slot) in targets {
        if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(key, value = %value, "Endpoint overridden from environment");
            *slot = value;
        }
    }
}
