//! Authentication use case.
//!
//! Signs users in and out and keeps the signed-in user cached through an
//! [`AuthStateRepository`] so it survives restarts until it expires.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use docchat_core::DocchatError;
use docchat_core::error::Result;
use docchat_core::state::{AuthStateRepository, StoredAuth};
use docchat_core::user::{AuthApi, SigninRequest, SignupRequest, User, UserRole};

use crate::notice::Notifier;

const LOGIN_FAILED: &str = "Login failed";

pub struct AuthUseCase {
    auth_api: Arc<dyn AuthApi>,
    repository: Arc<dyn AuthStateRepository>,
    current: Arc<RwLock<StoredAuth>>,
    session_lifetime: Duration,
    notifier: Notifier,
}

impl AuthUseCase {
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        repository: Arc<dyn AuthStateRepository>,
        session_lifetime: Duration,
        notifier: Notifier,
    ) -> Self {
        Self {
            auth_api,
            repository,
            current: Arc::new(RwLock::new(StoredAuth::default())),
            session_lifetime,
            notifier,
        }
    }

    /// Signs in and caches the returned user until `now + session_lifetime`.
    pub async fn signin(&self, credentials: &SigninRequest) -> Result<User> {
        let users = match self.auth_api.signin(credentials).await {
            Ok(users) => users,
            Err(e) => {
                self.notifier.error(e.to_string()).await;
                return Err(e);
            }
        };

        let Some(user) = users.into_iter().next() else {
            let err = DocchatError::InvalidCredentials(LOGIN_FAILED.to_string());
            self.notifier.error(err.to_string()).await;
            return Err(err);
        };

        let state = StoredAuth::signed_in(user.clone(), Utc::now(), self.session_lifetime);
        if let Err(e) = self.repository.save(&state).await {
            // Still signed in for this run
            tracing::warn!(error = %e, "Failed to persist auth state");
        }
        *self.current.write().await = state;

        tracing::info!(user_id = user.user_id, role = %user.role(), "Signed in");
        self.notifier.success("Signed in successfully").await;
        Ok(user)
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        match self.auth_api.signup(request).await {
            Ok(()) => {
                tracing::info!(user_email = %request.user_email, "Account created");
                self.notifier
                    .success("Account created successfully. Please sign in.")
                    .await;
                Ok(())
            }
            Err(e) => {
                self.notifier.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Restores the cached sign-in at startup.
    ///
    /// Expired or unreadable records are cleared and yield `None`.
    pub async fn restore(&self) -> Option<User> {
        let state = match self.repository.load().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Cached auth state unreadable, signing out");
                self.logout().await;
                return None;
            }
        };

        match state.active_user(Utc::now()).cloned() {
            Some(user) => {
                tracing::info!(user_id = user.user_id, "Restored sign-in");
                *self.current.write().await = state;
                Some(user)
            }
            None => {
                if state.user.is_some() {
                    tracing::info!("Cached sign-in expired");
                }
                self.logout().await;
                None
            }
        }
    }

    /// Forgets the user in memory and on disk.
    pub async fn logout(&self) {
        *self.current.write().await = StoredAuth::default();
        if let Err(e) = self.repository.clear().await {
            tracing::warn!(error = %e, "Failed to clear auth state");
        }
    }

    /// The signed-in user, if the sign-in has not expired.
    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.active_user(Utc::now()).cloned()
    }

    /// Like [`current_user`](Self::current_user) but fails with `NotAuthenticated`.
    pub async fn require_user(&self) -> Result<User> {
        self.current_user()
            .await
            .ok_or(DocchatError::NotAuthenticated)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current_user().await.is_some()
    }

    pub async fn role(&self) -> Option<UserRole> {
        self.current_user().await.map(|u| u.role())
    }
}
