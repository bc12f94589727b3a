//! Wiring of stores and use cases around a set of collaborators.

use std::sync::Arc;

use docchat_core::chat::HistoryApi;
use docchat_core::config::ClientConfig;
use docchat_core::llm::LlmApi;
use docchat_core::state::AuthStateRepository;
use docchat_core::user::AuthApi;
use docchat_core::workspace::CoreApi;

use crate::admin_usecase::AdminUseCase;
use crate::auth_usecase::AuthUseCase;
use crate::chat_usecase::ChatUseCase;
use crate::directory::WorkspaceDirectory;
use crate::notice::Notifier;
use crate::session::SessionStore;
use crate::timeline::ChatTimelineStore;

/// The remote services and local storage the application depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub core_api: Arc<dyn CoreApi>,
    pub auth_api: Arc<dyn AuthApi>,
    pub llm_api: Arc<dyn LlmApi>,
    pub history_api: Arc<dyn HistoryApi>,
    pub auth_state: Arc<dyn AuthStateRepository>,
}

/// Every use case, sharing one set of stores and one notifier.
pub struct DocchatServices {
    pub notifier: Notifier,
    pub auth: Arc<AuthUseCase>,
    pub admin: AdminUseCase,
    pub directory: Arc<WorkspaceDirectory>,
    pub chat: ChatUseCase,
}

impl DocchatServices {
    pub fn new(collaborators: Collaborators, config: &ClientConfig) -> Self {
        let notifier = Notifier::new();

        let auth = Arc::new(AuthUseCase::new(
            collaborators.auth_api.clone(),
            collaborators.auth_state,
            config.session_lifetime(),
            notifier.clone(),
        ));
        let admin = AdminUseCase::new(auth.clone(), collaborators.auth_api, notifier.clone());
        let directory = Arc::new(WorkspaceDirectory::new(
            collaborators.core_api.clone(),
            notifier.clone(),
        ));
        let chat = ChatUseCase::new(
            collaborators.core_api,
            collaborators.llm_api,
            collaborators.history_api,
            auth.clone(),
            directory.clone(),
            SessionStore::new(),
            ChatTimelineStore::new(),
            config.prompt.clone(),
            notifier.clone(),
        );

        Self {
            notifier,
            auth,
            admin,
            directory,
            chat,
        }
    }

    /// Restores a cached sign-in and, if there is one, loads its workspaces.
    pub async fn start(&self) -> Option<docchat_core::user::User> {
        let user = self.auth.restore().await?;
        if let Err(e) = self.directory.refresh(user.user_id).await {
            tracing::warn!(user_id = user.user_id, error = %e, "Initial workspace refresh failed");
        }
        Some(user)
    }

    /// Signs out and forgets all per-user in-memory state.
    pub async fn logout(&self) {
        self.auth.logout().await;
        self.directory.clear().await;
        self.chat.sessions().clear().await;
        self.chat.timeline().clear().await;
        tracing::info!("Signed out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        MockAuthApi, MockAuthStateRepository, MockCoreApi, MockHistoryApi, MockLlmApi, user,
    };
    use chrono::{Duration, Utc};
    use docchat_core::llm::SessionToken;
    use docchat_core::state::StoredAuth;

    #[tokio::test]
    async fn test_start_restores_and_logout_forgets() {
        let core = Arc::new(MockCoreApi::new());
        let ws = core.seed_workspace("Mine", 1);
        let repo = Arc::new(MockAuthStateRepository::with_state(StoredAuth::signed_in(
            user(1, 2),
            Utc::now(),
            Duration::hours(24),
        )));
        let services = DocchatServices::new(
            Collaborators {
                core_api: core,
                auth_api: Arc::new(MockAuthApi::default()),
                llm_api: Arc::new(MockLlmApi::new()),
                history_api: Arc::new(MockHistoryApi::new()),
                auth_state: repo.clone(),
            },
            &ClientConfig::default(),
        );

        let restored = services.start().await;
        assert_eq!(restored.map(|u| u.user_id), Some(1));
        assert_eq!(services.directory.workspaces().await.len(), 1);

        services
            .chat
            .sessions()
            .set_session(ws, SessionToken::new("s"))
            .await;
        services.logout().await;

        assert!(!services.auth.is_authenticated().await);
        assert!(services.directory.workspaces().await.is_empty());
        assert!(services.chat.sessions().get_session(ws).await.is_none());
        assert!(repo.stored().is_none());
    }
}
