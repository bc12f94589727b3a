//! Builds the application services from configuration and real clients.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use docchat_application::{Collaborators, DocchatServices, NoticeLevel};
use docchat_infrastructure::{ConfigService, FileAuthStateRepository};
use docchat_interaction::{AuthApiClient, CoreApiClient, HistoryApiClient, LlmApiClient};

pub async fn build_services(config_path: Option<&Path>) -> Result<DocchatServices> {
    let config_service = match config_path {
        Some(path) => ConfigService::with_path(path.to_path_buf()),
        None => ConfigService::new(),
    };
    let config = config_service
        .get_config()
        .context("Failed to load configuration")?;
    tracing::debug!(?config.endpoints, "Using endpoints");

    let collaborators = Collaborators {
        core_api: Arc::new(CoreApiClient::new(&config)?),
        auth_api: Arc::new(AuthApiClient::new(&config)?),
        llm_api: Arc::new(LlmApiClient::new(&config)?),
        history_api: Arc::new(HistoryApiClient::new(&config)?),
        auth_state: Arc::new(FileAuthStateRepository::new()?),
    };

    let services = DocchatServices::new(collaborators, &config);
    services
        .notifier
        .set_callback(Arc::new(|notice| match notice.level {
            NoticeLevel::Success => println!("{}", notice.message.green()),
            NoticeLevel::Error => eprintln!("{}", notice.message.red()),
        }))
        .await;

    services.start().await;
    Ok(services)
}
