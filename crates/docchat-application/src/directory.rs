//! Workspace directory: the user's workspaces with their documents.

use std::sync::Arc;
use tokio::sync::RwLock;

use docchat_core::DocchatError;
use docchat_core::error::Result;
use docchat_core::user::UserId;
use docchat_core::workspace::{
    CoreApi, DocumentId, Workspace, WorkspaceId, WorkspaceWithDocuments,
};

use crate::notice::Notifier;

#[derive(Debug, Default)]
struct DirectoryState {
    workspaces: Vec<WorkspaceWithDocuments>,
    selected: Option<WorkspaceWithDocuments>,
}

/// In-memory list of workspaces, refreshed wholesale from the core API.
///
/// Mutations go to the core API first and are reflected locally only by the
/// refresh that follows them.
pub struct WorkspaceDirectory {
    core_api: Arc<dyn CoreApi>,
    state: Arc<RwLock<DirectoryState>>,
    notifier: Notifier,
}

impl WorkspaceDirectory {
    pub fn new(core_api: Arc<dyn CoreApi>, notifier: Notifier) -> Self {
        Self {
            core_api,
            state: Arc::new(RwLock::new(DirectoryState::default())),
            notifier,
        }
    }

    /// Re-reads every workspace of `user_id` and its documents.
    ///
    /// Documents are fetched one workspace at a time; a failed fetch leaves
    /// that workspace with no documents. The list is swapped in only once
    /// everything has been fetched, and the selection is re-pointed at the
    /// fresh entry (or dropped if the workspace is gone). A failure to list
    /// workspaces leaves the directory as it was.
    pub async fn refresh(&self, user_id: UserId) -> Result<()> {
        let workspaces = self.core_api.list_workspaces(user_id).await?;

        let mut fresh = Vec::with_capacity(workspaces.len());
        for workspace in workspaces {
            let mut entry = WorkspaceWithDocuments::empty(workspace);
            if let Some(workspace_id) = entry.id() {
                match self.core_api.list_documents(workspace_id).await {
                    Ok(documents) => entry.documents = documents,
                    Err(e) => {
                        tracing::warn!(workspace_id, error = %e, "Failed to fetch documents");
                    }
                }
            }
            fresh.push(entry);
        }

        let mut state = self.state.write().await;
        state.selected = state
            .selected
            .as_ref()
            .and_then(|selected| selected.id())
            .and_then(|id| fresh.iter().find(|w| w.id() == Some(id)).cloned());
        state.workspaces = fresh;
        tracing::info!(
            user_id,
            count = state.workspaces.len(),
            "Workspace directory refreshed"
        );
        Ok(())
    }

    /// Creates a workspace unless one with the same name (ignoring case) is
    /// already listed.
    pub async fn create_workspace(&self, name: &str, user_id: UserId) -> Result<()> {
        self.ensure_unique_name(name, None).await?;

        let workspace = Workspace::new(name, user_id);
        if let Err(e) = self.core_api.create_workspace(&workspace).await {
            self.notifier.error(e.to_string()).await;
            return Err(e);
        }

        self.refresh_after_change(user_id).await;
        self.notifier.success("Workspace created successfully").await;
        Ok(())
    }

    /// Renames or otherwise updates a persisted workspace.
    pub async fn update_workspace(&self, workspace: &Workspace) -> Result<()> {
        self.ensure_unique_name(&workspace.name, workspace.id).await?;

        if let Err(e) = self.core_api.update_workspace(workspace).await {
            self.notifier.error(e.to_string()).await;
            return Err(e);
        }

        self.refresh_after_change(workspace.user_id).await;
        self.notifier.success("Workspace updated successfully").await;
        Ok(())
    }

    /// Soft-deletes a workspace. Deleting the selected one clears the
    /// selection.
    pub async fn delete_workspace(&self, workspace_id: WorkspaceId, user_id: UserId) -> Result<()> {
        if let Err(e) = self.core_api.delete_workspace(workspace_id).await {
            self.notifier.error(e.to_string()).await;
            return Err(e);
        }

        {
            let mut state = self.state.write().await;
            if state.selected.as_ref().and_then(|s| s.id()) == Some(workspace_id) {
                state.selected = None;
            }
        }

        self.refresh_after_change(user_id).await;
        self.notifier.success("Workspace deleted successfully").await;
        Ok(())
    }

    /// Soft-deletes a document, then refreshes.
    pub async fn delete_document(&self, document_id: DocumentId, user_id: UserId) -> Result<()> {
        if let Err(e) = self.core_api.delete_document(document_id).await {
            self.notifier.error(e.to_string()).await;
            return Err(e);
        }

        self.refresh_after_change(user_id).await;
        self.notifier.success("Document deleted successfully").await;
        Ok(())
    }

    pub async fn select_workspace(&self, workspace: WorkspaceWithDocuments) {
        tracing::debug!(workspace_id = ?workspace.id(), "Workspace selected");
        self.state.write().await.selected = Some(workspace);
    }

    pub async fn selected(&self) -> Option<WorkspaceWithDocuments> {
        self.state.read().await.selected.clone()
    }

    pub async fn workspaces(&self) -> Vec<WorkspaceWithDocuments> {
        self.state.read().await.workspaces.clone()
    }

    pub async fn find(&self, workspace_id: WorkspaceId) -> Option<WorkspaceWithDocuments> {
        self.state
            .read()
            .await
            .workspaces
            .iter()
            .find(|w| w.id() == Some(workspace_id))
            .cloned()
    }

    /// Empties the directory (on logout).
    pub async fn clear(&self) {
        *self.state.write().await = DirectoryState::default();
    }

    /// Refreshes after a successful remote change.
    ///
    /// The change already happened, so a failed refresh is reported but not
    /// returned.
    pub(crate) async fn refresh_after_change(&self, user_id: UserId) {
        if let Err(e) = self.refresh(user_id).await {
            tracing::error!(user_id, error = %e, "Refresh after change failed");
            self.notifier
                .error(format!("Failed to refresh workspaces: {}", e))
                .await;
        }
    }

    async fn ensure_unique_name(&self, name: &str, except: Option<WorkspaceId>) -> Result<()> {
        let state = self.state.read().await;
        let duplicate = state
            .workspaces
            .iter()
            .any(|w| w.workspace.has_name(name) && (except.is_none() || w.id() != except));
        drop(state);

        if duplicate {
            let err = DocchatError::DuplicateWorkspaceName {
                name: name.to_string(),
            };
            self.notifier.error(err.to_string()).await;
            return Err(err);
        }
        Ok(())
    }
}
