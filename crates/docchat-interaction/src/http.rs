//! Shared request plumbing for the collaborator clients.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use docchat_core::DocchatError;
use docchat_core::error::{Collaborator, Result};

use crate::wire::Envelope;

/// A base URL on one collaborator plus the client used to reach it.
#[derive(Clone, Debug)]
pub struct HttpEndpoint {
    client: Client,
    base_url: String,
    collaborator: Collaborator,
}

impl HttpEndpoint {
    /// Creates an endpoint whose requests time out after `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        collaborator: Collaborator,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DocchatError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url, collaborator))
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        collaborator: Collaborator,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collaborator,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Wraps a message as a failure of this collaborator.
    pub fn failure(&self, message: impl Into<String>) -> DocchatError {
        DocchatError::collaborator(self.collaborator, message)
    }

    /// Sends a request expecting a `{success, data, message}` envelope.
    ///
    /// An error status whose body is still an envelope comes back as an
    /// envelope with `success = false`, so callers can surface the backend's
    /// message. Transport errors and unreadable bodies are failures.
    pub async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<Envelope<T>> {
        let response = request
            .send()
            .await
            .map_err(|e| self.failure(format!("{}: {}", action, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.failure(format!("{}: failed to read body: {}", action, e)))?;

        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(mut envelope) => {
                if !status.is_success() {
                    tracing::debug!(%status, action, "Collaborator returned an error envelope");
                    envelope.success = false;
                }
                Ok(envelope)
            }
            Err(_) if !status.is_success() => Err(self.failure(format!(
                "{} ({}): {}",
                action,
                status,
                body.trim()
            ))),
            Err(e) => Err(self.failure(format!("{}: invalid response: {}", action, e))),
        }
    }

    /// Like [`fetch_envelope`](Self::fetch_envelope) but treats
    /// `success = false` as a failure and returns the data.
    pub async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<Option<T>> {
        let envelope = self.fetch_envelope(request, action).await?;
        self.require_success(envelope, action)
    }

    pub fn require_success<T>(&self, envelope: Envelope<T>, action: &str) -> Result<Option<T>> {
        if envelope.success {
            Ok(envelope.data)
        } else {
            let message = envelope
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} failed", action));
            Err(self.failure(message))
        }
    }

    /// Sends a request whose response body is plain JSON.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| self.failure(format!("{}: {}", action, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(self.failure(format!("{} ({}): {}", action, status, error_text.trim())));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| self.failure(format!("{}: invalid response: {}", action, e)))
    }
}
