//! Unified path management for docchat files.
//!
//! All paths are resolved via `AppPaths` from the version-migrate crate so the
//! layout follows platform conventions (XDG on Linux).

use std::path::PathBuf;
use version_migrate::AppPaths;

use docchat_core::DocchatError;
use docchat_core::error::Result;

/// Path resolution for docchat.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/docchat/
/// ├── config.toml        # Collaborator URLs, timeouts, prompt defaults
/// └── auth_state.json    # Cached sign-in (versioned)
/// ```
pub struct DocchatPaths;

impl DocchatPaths {
    const APP_NAME: &'static str = "docchat";
    const CONFIG_FILENAME: &'static str = "config.toml";
    const AUTH_STATE_FILENAME: &'static str = "auth_state.json";

    fn app_paths() -> AppPaths {
        AppPaths::new(Self::APP_NAME)
    }

    /// Returns the docchat configuration directory (e.g. `~/.config/docchat/`).
    pub fn config_dir() -> Result<PathBuf> {
        Self::app_paths()
            .config_dir()
            .map_err(|e| DocchatError::config(format!("Cannot resolve config directory: {}", e)))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(Self::CONFIG_FILENAME))
    }

    pub fn auth_state_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(Self::AUTH_STATE_FILENAME))
    }
}
