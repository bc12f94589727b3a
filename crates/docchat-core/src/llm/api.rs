//! LLM API collaborator trait.

use async_trait::async_trait;

use super::model::{LlmAnswer, SessionToken};
use crate::error::Result;
use crate::workspace::{UploadFile, WorkspaceId};

/// Remote document-ingestion and question-answering service.
///
/// The state layer never retries these calls.
#[async_trait]
pub trait LlmApi: Send + Sync {
    /// Uploads a document and returns the session token for the workspace.
    async fn upload_document(
        &self,
        file: &UploadFile,
        workspace_id: WorkspaceId,
    ) -> Result<SessionToken>;

    /// Asks a question within an existing session.
    async fn query(&self, question: &str, session: &SessionToken) -> Result<LlmAnswer>;
}
