use docchat_core::llm::SessionToken;
use docchat_core::workspace::WorkspaceId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory map from workspace to its live LLM session token.
///
/// At most one token per workspace; a later `set_session` replaces the
/// earlier one. Nothing here expires or fails.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<WorkspaceId, SessionToken>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token` for the workspace, replacing any previous one.
    pub async fn set_session(&self, workspace_id: WorkspaceId, token: SessionToken) {
        let mut sessions = self.sessions.write().await;
        if let Some(previous) = sessions.insert(workspace_id, token) {
            tracing::debug!(workspace_id, previous = %previous, "Replaced LLM session");
        }
    }

    pub async fn get_session(&self, workspace_id: WorkspaceId) -> Option<SessionToken> {
        self.sessions.read().await.get(&workspace_id).cloned()
    }

    /// Drops every token (on logout).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}
