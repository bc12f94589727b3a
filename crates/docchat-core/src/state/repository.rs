//! Auth state repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::StoredAuth;

/// Local storage for the cached sign-in.
#[async_trait]
pub trait AuthStateRepository: Send + Sync {
    /// Loads the cached state. A missing record yields `StoredAuth::default()`.
    async fn load(&self) -> Result<StoredAuth>;

    async fn save(&self, state: &StoredAuth) -> Result<()>;

    /// Removes the cached state; succeeds when nothing is stored.
    async fn clear(&self) -> Result<()>;
}
