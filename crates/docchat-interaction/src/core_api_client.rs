//! Core API client: workspace and document CRUD.

use async_trait::async_trait;
use reqwest::Client;

use docchat_core::config::ClientConfig;
use docchat_core::error::{Collaborator, Result};
use docchat_core::user::UserId;
use docchat_core::workspace::{CoreApi, Document, DocumentId, Workspace, WorkspaceId};

use crate::http::HttpEndpoint;
use crate::wire::{
    DocumentDeactivation, DocumentPayload, WorkspaceDeactivation, WorkspacePayload,
};

const WORKSPACES_PATH: &str = "workspaces";
const DOCUMENTS_PATH: &str = "ws-docs";

/// [`CoreApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct CoreApiClient {
    endpoint: HttpEndpoint,
}

impl CoreApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            endpoint: HttpEndpoint::new(
                config.endpoints.core_api_url.clone(),
                Collaborator::CoreApi,
                config.request_timeout(),
            )?,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: HttpEndpoint::with_client(Client::new(), base_url, Collaborator::CoreApi),
        }
    }
}

#[async_trait]
impl CoreApi for CoreApiClient {
    async fn list_workspaces(&self, user_id: UserId) -> Result<Vec<Workspace>> {
        let request = self
            .endpoint
            .client()
            .get(self.endpoint.url(WORKSPACES_PATH))
            .query(&[("user_id", user_id)]);

        let data: Option<Vec<WorkspacePayload>> = self
            .endpoint
            .send_envelope(request, "list workspaces")
            .await?;

        let workspaces: Vec<Workspace> = data
            .unwrap_or_default()
            .into_iter()
            .map(Workspace::from)
            .collect();
        tracing::debug!(user_id, count = workspaces.len(), "Fetched workspaces");
        Ok(workspaces)
    }

    async fn create_workspace(&self, workspace: &Workspace) -> Result<()> {
        let payload = WorkspacePayload {
            is_active: true,
            ..WorkspacePayload::from(workspace)
        };
        let request = self
            .endpoint
            .client()
            .post(self.endpoint.url(WORKSPACES_PATH))
            .json(&payload);

        self.endpoint
            .send_envelope::<serde_json::Value>(request, "create workspace")
            .await?;
        Ok(())
    }

    async fn update_workspace(&self, workspace: &Workspace) -> Result<()> {
        let request = self
            .endpoint
            .client()
            .put(self.endpoint.url(WORKSPACES_PATH))
            .json(&WorkspacePayload::from(workspace));

        self.endpoint
            .send_envelope::<serde_json::Value>(request, "update workspace")
            .await?;
        Ok(())
    }

    async fn delete_workspace(&self, workspace_id: WorkspaceId) -> Result<()> {
        let request = self
            .endpoint
            .client()
            .delete(self.endpoint.url(WORKSPACES_PATH))
            .json(&WorkspaceDeactivation {
                ws_id: workspace_id,
                is_active: false,
            });

        self.endpoint
            .send_envelope::<serde_json::Value>(request, "delete workspace")
            .await?;
        Ok(())
    }

    async fn list_documents(&self, workspace_id: WorkspaceId) -> Result<Vec<Document>> {
        let request = self
            .endpoint
            .client()
            .get(self.endpoint.url(DOCUMENTS_PATH))
            .query(&[("ws_id", workspace_id)]);

        let data: Option<Vec<DocumentPayload>> = self
            .endpoint
            .send_envelope(request, "list documents")
            .await?;

        Ok(data
            .unwrap_or_default()
            .into_iter()
            .map(Document::from)
            .collect())
    }

    async fn register_document(&self, document: &Document) -> Result<()> {
        let request = self
            .endpoint
            .client()
            .post(self.endpoint.url(DOCUMENTS_PATH))
            .json(&DocumentPayload::from(document));

        self.endpoint
            .send_envelope::<serde_json::Value>(request, "register document")
            .await?;
        Ok(())
    }

    async fn delete_document(&self, document_id: DocumentId) -> Result<()> {
        let request = self
            .endpoint
            .client()
            .delete(self.endpoint.url(DOCUMENTS_PATH))
            .json(&DocumentDeactivation {
                ws_doc_id: document_id,
                is_active: false,
            });

        self.endpoint
            .send_envelope::<serde_json::Value>(request, "delete document")
            .await?;
        Ok(())
    }
}
