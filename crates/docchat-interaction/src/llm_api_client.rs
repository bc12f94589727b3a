//! LLM API client: document ingestion and question answering.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use docchat_core::config::ClientConfig;
use docchat_core::error::{Collaborator, Result};
use docchat_core::llm::{LlmAnswer, LlmApi, SessionToken};
use docchat_core::workspace::{UploadFile, WorkspaceId};

use crate::http::HttpEndpoint;
use crate::wire::UploadResponse;

/// [`LlmApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct LlmApiClient {
    endpoint: HttpEndpoint,
}

impl LlmApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            endpoint: HttpEndpoint::new(
                config.endpoints.llm_api_url.clone(),
                Collaborator::LlmApi,
                config.request_timeout(),
            )?,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: HttpEndpoint::with_client(Client::new(), base_url, Collaborator::LlmApi),
        }
    }
}

#[async_trait]
impl LlmApi for LlmApiClient {
    async fn upload_document(
        &self,
        file: &UploadFile,
        workspace_id: WorkspaceId,
    ) -> Result<SessionToken> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| self.endpoint.failure(format!("invalid MIME type: {}", e)))?;

        let form = Form::new()
            .part("files", part)
            .text("workspace_id", workspace_id.to_string());

        let request = self
            .endpoint
            .client()
            .post(self.endpoint.url("upload"))
            .multipart(form);

        let response: UploadResponse = self.endpoint.send_json(request, "upload").await?;

        match response.session_id {
            Some(session_id) if response.success && !session_id.is_empty() => {
                tracing::debug!(workspace_id, "LLM upload returned a session");
                Ok(SessionToken::new(session_id))
            }
            _ => Err(self.endpoint.failure(
                response
                    .message
                    .unwrap_or_else(|| "upload returned no session".to_string()),
            )),
        }
    }

    async fn query(&self, question: &str, session: &SessionToken) -> Result<LlmAnswer> {
        let request = self
            .endpoint
            .client()
            .post(self.endpoint.url("query"))
            .form(&[("question", question), ("session_id", session.as_str())]);

        self.endpoint.send_json(request, "query").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_core::error::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pdf() -> UploadFile {
        UploadFile::new("paper.pdf", "application/pdf", b"%PDF-1.4".to_vec())
    }

    #[tokio::test]
    async fn test_upload_returns_session_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(body_string_contains("name=\"files\""))
            .and(body_string_contains("name=\"workspace_id\""))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "session_id": "sess-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmApiClient::with_base_url(server.uri());
        let token = client.upload_document(&pdf(), 3).await.unwrap();
        assert_eq!(token.as_str(), "sess-1");
    }

    #[tokio::test]
    async fn test_upload_without_session_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;

        let client = LlmApiClient::with_base_url(server.uri());
        let err = client.upload_document(&pdf(), 3).await.unwrap_err();
        assert_eq!(err.collaborator_of(), Some(Collaborator::LlmApi));
    }

    #[tokio::test]
    async fn test_query_sends_form_and_parses_citations() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("question=what+is+it"))
            .and(body_string_contains("session_id=sess-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "answer": "A report.",
                "sources": [
                    {"source_id": "s1", "summary": "intro", "file": "paper.pdf", "page": 2}
                ]
            })))
            .mount(&server)
            .await;

        let client = LlmApiClient::with_base_url(server.uri());
        let answer = client
            .query("what is it", &SessionToken::new("sess-9"))
            .await
            .unwrap();

        assert_eq!(answer.answer, "A report.");
        assert_eq!(answer.sources[0].page, 2);
    }

    #[tokio::test]
    async fn test_query_error_status_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = LlmApiClient::with_base_url(server.uri());
        let err = client
            .query("hi", &SessionToken::new("s"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Collaborator);
    }
}
