//! Workspace domain module.
//!
//! Workspaces are named containers for a user's documents. The list and its
//! documents are owned remotely by the core API; this module only describes
//! the shapes and the contract of that collaborator.

pub mod api;
pub mod model;
pub mod upload;

pub use api::CoreApi;
pub use model::{Document, DocumentId, Workspace, WorkspaceId, WorkspaceWithDocuments};
pub use upload::UploadFile;
