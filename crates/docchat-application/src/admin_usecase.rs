//! Admin user management.

use std::sync::Arc;

use docchat_core::DocchatError;
use docchat_core::error::Result;
use docchat_core::user::{AuthApi, ManagedUser};

use crate::auth_usecase::AuthUseCase;
use crate::notice::Notifier;

/// User listing and editing, restricted to administrators.
pub struct AdminUseCase {
    auth: Arc<AuthUseCase>,
    auth_api: Arc<dyn AuthApi>,
    notifier: Notifier,
}

impl AdminUseCase {
    pub fn new(auth: Arc<AuthUseCase>, auth_api: Arc<dyn AuthApi>, notifier: Notifier) -> Self {
        Self {
            auth,
            auth_api,
            notifier,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<ManagedUser>> {
        self.require_admin().await?;
        self.auth_api.list_users().await
    }

    pub async fn update_user(&self, user: &ManagedUser) -> Result<()> {
        self.require_admin().await?;
        match self.auth_api.update_user(user).await {
            Ok(()) => {
                tracing::info!(user_id = user.user_id, "User updated");
                self.notifier.success("User updated successfully").await;
                Ok(())
            }
            Err(e) => {
                self.notifier.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    async fn require_admin(&self) -> Result<()> {
        let user = self.auth.require_user().await?;
        if !user.is_admin() {
            return Err(DocchatError::Forbidden(
                "user management requires the admin role".to_string(),
            ));
        }
        Ok(())
    }
}
