//! Auth API collaborator trait.

use async_trait::async_trait;

use super::model::{ManagedUser, SigninRequest, SignupRequest, User};
use crate::error::Result;

/// Remote authentication and user-management service.
///
/// `signin` returns the user records carried in the response envelope; an
/// empty list means the credentials were not accepted.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signin(&self, credentials: &SigninRequest) -> Result<Vec<User>>;

    async fn signup(&self, request: &SignupRequest) -> Result<()>;

    async fn list_users(&self) -> Result<Vec<ManagedUser>>;

    async fn update_user(&self, user: &ManagedUser) -> Result<()>;
}
