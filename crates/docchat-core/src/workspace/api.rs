//! Core API collaborator trait.
//!
//! Defines the interface for the remote workspace/document CRUD service.

use super::model::{Document, DocumentId, Workspace, WorkspaceId};
use crate::error::Result;
use crate::user::UserId;
use async_trait::async_trait;

/// Remote CRUD service for workspaces and their documents.
///
/// Implementations must map transport errors, non-2xx statuses and
/// `success = false` envelopes to [`crate::DocchatError::Collaborator`].
/// Deletes are soft: the backend flips the active flag.
#[async_trait]
pub trait CoreApi: Send + Sync {
    /// Lists the workspaces owned by a user.
    async fn list_workspaces(&self, user_id: UserId) -> Result<Vec<Workspace>>;

    /// Persists a new workspace.
    async fn create_workspace(&self, workspace: &Workspace) -> Result<()>;

    /// Updates name/active flag of an existing workspace.
    async fn update_workspace(&self, workspace: &Workspace) -> Result<()>;

    /// Soft-deletes a workspace.
    async fn delete_workspace(&self, workspace_id: WorkspaceId) -> Result<()>;

    /// Lists the documents registered in a workspace.
    async fn list_documents(&self, workspace_id: WorkspaceId) -> Result<Vec<Document>>;

    /// Registers document metadata for an uploaded file.
    async fn register_document(&self, document: &Document) -> Result<()>;

    /// Soft-deletes a document.
    async fn delete_document(&self, document_id: DocumentId) -> Result<()>;
}
