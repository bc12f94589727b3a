//! HTTP clients for the remote collaborators.
//!
//! Each client implements one of the collaborator traits from `docchat-core`
//! on top of `reqwest`.

pub mod auth_api_client;
pub mod core_api_client;
pub mod history_api_client;
pub mod http;
pub mod llm_api_client;
pub mod wire;

pub use auth_api_client::AuthApiClient;
pub use core_api_client::CoreApiClient;
pub use history_api_client::HistoryApiClient;
pub use llm_api_client::LlmApiClient;
