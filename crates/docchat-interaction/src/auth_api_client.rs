//! Auth API client: sign-in, sign-up and user management.

use async_trait::async_trait;
use reqwest::Client;

use docchat_core::DocchatError;
use docchat_core::config::ClientConfig;
use docchat_core::error::{Collaborator, Result};
use docchat_core::user::{AuthApi, ManagedUser, SigninRequest, SignupRequest, User};

use crate::http::HttpEndpoint;

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Failed to create account";

/// [`AuthApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct AuthApiClient {
    endpoint: HttpEndpoint,
}

impl AuthApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            endpoint: HttpEndpoint::new(
                config.endpoints.auth_api_url.clone(),
                Collaborator::AuthApi,
                config.request_timeout(),
            )?,
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: HttpEndpoint::with_client(Client::new(), base_url, Collaborator::AuthApi),
        }
    }
}

#[async_trait]
impl AuthApi for AuthApiClient {
    async fn signin(&self, credentials: &SigninRequest) -> Result<Vec<User>> {
        let request = self
            .endpoint
            .client()
            .post(self.endpoint.url("signin"))
            .json(credentials);

        let envelope = self
            .endpoint
            .fetch_envelope::<Vec<User>>(request, "sign-in")
            .await?;

        // A rejected sign-in is a credential problem, not a service failure
        if !envelope.success {
            let message = envelope
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            return Err(DocchatError::InvalidCredentials(message));
        }

        Ok(envelope.data.unwrap_or_default())
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let http_request = self
            .endpoint
            .client()
            .post(self.endpoint.url("signup"))
            .json(request);

        let envelope = self
            .endpoint
            .fetch_envelope::<serde_json::Value>(http_request, "sign-up")
            .await?;

        if !envelope.success {
            let message = envelope
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| SIGNUP_FAILED.to_string());
            return Err(self.endpoint.failure(message));
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<ManagedUser>> {
        let request = self.endpoint.client().get(self.endpoint.url("users"));
        let users: Option<Vec<ManagedUser>> =
            self.endpoint.send_envelope(request, "list users").await?;
        Ok(users.unwrap_or_default())
    }

    async fn update_user(&self, user: &ManagedUser) -> Result<()> {
        let request = self
            .endpoint
            .client()
            .put(self.endpoint.url("users"))
            .json(user);
        self.endpoint
            .send_envelope::<serde_json::Value>(request, "update user")
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_core::user::Gender;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> SigninRequest {
        SigninRequest {
            user_email: "ada@example.com".to_string(),
            user_pwd: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signin_returns_users() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signin"))
            .and(body_json(json!({"user_email": "ada@example.com", "user_pwd": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "msg": "welcome",
                "data": [{"user_id": 1, "user_name": "Ada", "user_email": "ada@example.com", "role_id": 1}]
            })))
            .mount(&server)
            .await;

        let client = AuthApiClient::with_base_url(server.uri());
        let users = client.signin(&credentials()).await.unwrap();

        assert_eq!(users.len(), 1);
        assert!(users[0].is_admin());
    }

    #[tokio::test]
    async fn test_rejected_signin_is_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signin"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "msg": "Wrong password"
            })))
            .mount(&server)
            .await;

        let client = AuthApiClient::with_base_url(server.uri());
        let err = client.signin(&credentials()).await.unwrap_err();

        assert_eq!(err, DocchatError::InvalidCredentials("Wrong password".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_signup_falls_back_to_default_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;

        let client = AuthApiClient::with_base_url(server.uri());
        let request = SignupRequest {
            user_name: "Bo".to_string(),
            user_email: "bo@example.com".to_string(),
            user_pwd: "pw".to_string(),
            user_mobile: "555".to_string(),
            gender: Gender::Other,
            is_active: true,
        };
        let err = client.signup(&request).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "auth API request failed: Failed to create account"
        );
    }

    #[tokio::test]
    async fn test_list_users_reads_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{
                    "user_id": 2, "user_name": "Cy", "user_email": "cy@example.com",
                    "user_mobile": "123", "gender": "MALE", "is_active": true
                }]
            })))
            .mount(&server)
            .await;

        let client = AuthApiClient::with_base_url(server.uri());
        let users = client.list_users().await.unwrap();
        assert_eq!(users[0].gender, Gender::Male);
    }
}
