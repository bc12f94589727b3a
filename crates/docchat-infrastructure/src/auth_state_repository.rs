//! Auth state repository implementation.
//!
//! Stores the cached sign-in as a versioned JSON file. Uses version-migrate
//! for automatic schema migration on read.
//!
//! File location: `~/.config/docchat/auth_state.json`

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use version_migrate::Migrator;

use docchat_core::DocchatError;
use docchat_core::error::Result;
use docchat_core::state::{AuthStateRepository, StoredAuth};

use crate::dto::create_auth_state_migrator;
use crate::paths::DocchatPaths;

/// File-based auth state repository with version migration support.
pub struct FileAuthStateRepository {
    path: PathBuf,
    migrator: Migrator,
}

impl FileAuthStateRepository {
    const ENTITY: &'static str = "auth_state";

    /// Creates a repository at the default location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(DocchatPaths::auth_state_file()?))
    }

    /// Creates a repository backed by a custom file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            migrator: create_auth_state_migrator(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl AuthStateRepository for FileAuthStateRepository {
    async fn load(&self) -> Result<StoredAuth> {
        if !self.path.exists() {
            return Ok(StoredAuth::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| DocchatError::io(format!("Failed to read auth state: {}", e)))?;

        let json_value: serde_json::Value = serde_json::from_str(&content)?;

        let state: StoredAuth = self
            .migrator
            .load_flat_from(Self::ENTITY, json_value)
            .map_err(|e| DocchatError::migration(format!("Failed to migrate auth state: {}", e)))?;

        Ok(state)
    }

    async fn save(&self, state: &StoredAuth) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DocchatError::io(format!("Failed to create directory: {}", e)))?;
        }

        // Serialized through the migrator so the file carries its schema version
        let serialized = self
            .migrator
            .save_domain_flat(Self::ENTITY, state.clone())
            .map_err(|e| DocchatError::config(format!("Failed to serialize auth state: {}", e)))?;

        fs::write(&self.path, serialized)
            .await
            .map_err(|e| DocchatError::io(format!("Failed to write auth state: {}", e)))?;

        tracing::debug!(path = %self.path.display(), "Saved auth state");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DocchatError::io(format!(
                "Failed to remove auth state: {}",
                e
            ))),
        }
    }
}
