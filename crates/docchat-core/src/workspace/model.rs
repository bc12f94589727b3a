use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Identifier assigned to a workspace by the core API.
pub type WorkspaceId = i64;

/// Identifier assigned to a document by the core API.
pub type DocumentId = i64;

/// A named container for a user's documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Identifier, `None` until the core API has persisted the workspace.
    pub id: Option<WorkspaceId>,
    /// Display name. Unique per user, compared case-insensitively.
    pub name: String,
    /// Owning user.
    pub user_id: UserId,
    /// Soft-delete flag.
    pub is_active: bool,
}

impl Workspace {
    /// Creates an unsaved, active workspace.
    pub fn new(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id: None,
            name: name.into(),
            user_id,
            is_active: true,
        }
    }

    /// Case-insensitive name comparison used for duplicate detection.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Metadata of an uploaded file registered with the core API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<DocumentId>,
    /// Storage path assigned by the backend (empty until it assigns one).
    pub path: String,
    /// Original file name, including extension.
    pub name: String,
    /// Extension without the dot.
    pub extension: String,
    /// Free-form purpose tag.
    pub purpose: String,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub is_active: bool,
}

/// A workspace together with the documents fetched for it during a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceWithDocuments {
    pub workspace: Workspace,
    pub documents: Vec<Document>,
}

impl WorkspaceWithDocuments {
    /// Wraps a workspace with an empty document list.
    pub fn empty(workspace: Workspace) -> Self {
        Self {
            workspace,
            documents: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<WorkspaceId> {
        self.workspace.id
    }

    pub fn name(&self) -> &str {
        &self.workspace.name
    }

    /// Number of documents attached to this workspace.
    pub fn file_count(&self) -> usize {
        self.documents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_name_is_case_insensitive() {
        let ws = Workspace::new("Quarterly Reports", 1);
        assert!(ws.has_name("quarterly reports"));
        assert!(ws.has_name("QUARTERLY REPORTS"));
        assert!(!ws.has_name("Quarterly"));
    }

    #[test]
    fn test_new_workspace_is_unsaved_and_active() {
        let ws = Workspace::new("Foo", 3);
        assert!(ws.id.is_none());
        assert!(ws.is_active);
        assert_eq!(ws.user_id, 3);
    }
}
