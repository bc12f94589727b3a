//! History API client: prompt record persistence.

use async_trait::async_trait;
use reqwest::Client;

use docchat_core::chat::{HistoryApi, PromptRecord};
use docchat_core::config::ClientConfig;
use docchat_core::error::{Collaborator, Result};
use docchat_core::user::UserId;
use docchat_core::workspace::WorkspaceId;

use crate::http::HttpEndpoint;
use crate::wire::SessionDeactivation;

const PROMPT_HISTORY_PATH: &str = "prompt-history";

/// [`HistoryApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct HistoryApiClient {
    endpoint: HttpEndpoint,
}

impl HistoryApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            endpoint: HttpEndpoint::new(
                config.endpoints.history_api_url.clone(),
                Collaborator::HistoryApi,
                config.request_timeout(),
            )?,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: HttpEndpoint::with_client(Client::new(), base_url, Collaborator::HistoryApi),
        }
    }
}

#[async_trait]
impl HistoryApi for HistoryApiClient {
    async fn save_prompt(&self, record: &PromptRecord) -> Result<()> {
        let request = self
            .endpoint
            .client()
            .post(self.endpoint.url(PROMPT_HISTORY_PATH))
            .json(record);

        self.endpoint
            .send_envelope::<serde_json::Value>(request, "save prompt")
            .await?;
        Ok(())
    }

    async fn fetch_prompts(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        session_id: Option<&str>,
    ) -> Result<Vec<PromptRecord>> {
        let mut query: Vec<(&str, String)> = vec![
            ("ws_id", workspace_id.to_string()),
            ("user_id", user_id.to_string()),
            ("is_active", "true".to_string()),
        ];
        if let Some(session_id) = session_id {
            query.push(("session_id", session_id.to_string()));
        }

        let request = self
            .endpoint
            .client()
            .get(self.endpoint.url(PROMPT_HISTORY_PATH))
            .query(&query);

        let records: Option<Vec<PromptRecord>> =
            self.endpoint.send_envelope(request, "fetch prompts").await?;
        Ok(records.unwrap_or_default())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let request = self
            .endpoint
            .client()
            .delete(self.endpoint.url(PROMPT_HISTORY_PATH))
            .json(&SessionDeactivation {
                session_id,
                is_active: false,
            });

        self.endpoint
            .send_envelope::<serde_json::Value>(request, "delete history")
            .await?;
        Ok(())
    }
}
