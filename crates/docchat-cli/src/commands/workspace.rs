use anyhow::{Context, Result};
use colored::Colorize;

use docchat_application::DocchatServices;
use docchat_core::workspace::WorkspaceWithDocuments;

/// Finds a listed workspace by id or (case-insensitive) name.
pub async fn resolve(services: &DocchatServices, key: &str) -> Result<WorkspaceWithDocuments> {
    let workspaces = services.directory.workspaces().await;
    let found = match key.parse::<i64>() {
        Ok(id) => workspaces.into_iter().find(|w| w.id() == Some(id)),
        Err(_) => workspaces.into_iter().find(|w| w.workspace.has_name(key)),
    };
    found.with_context(|| format!("No workspace '{}'", key))
}

pub async fn list(services: &DocchatServices) -> Result<()> {
    services.auth.require_user().await?;
    let workspaces = services.directory.workspaces().await;
    if workspaces.is_empty() {
        println!("{}", "No workspaces".bright_black());
    }
    for ws in workspaces {
        println!(
            "{} {} ({} files)",
            format!("[{}]", ws.id().unwrap_or_default()).bright_black(),
            ws.name().bold(),
            ws.file_count()
        );
        for doc in &ws.documents {
            println!("    {}", doc.name);
        }
    }
    Ok(())
}

pub async fn create(services: &DocchatServices, name: &str) -> Result<()> {
    let user = services.auth.require_user().await?;
    services.directory.create_workspace(name, user.user_id).await?;
    Ok(())
}

pub async fn delete(services: &DocchatServices, key: &str) -> Result<()> {
    let user = services.auth.require_user().await?;
    let ws = resolve(services, key).await?;
    let id = ws.id().context("Workspace has no id")?;
    services.directory.delete_workspace(id, user.user_id).await?;
    Ok(())
}

/// Removes a document (by id or file name) from a workspace.
pub async fn delete_document(services: &DocchatServices, key: &str, document: &str) -> Result<()> {
    let user = services.auth.require_user().await?;
    let ws = resolve(services, key).await?;
    let found = match document.parse::<i64>() {
        Ok(id) => ws.documents.iter().find(|d| d.id == Some(id)),
        Err(_) => ws.documents.iter().find(|d| d.name == document),
    };
    let id = found
        .and_then(|d| d.id)
        .with_context(|| format!("No document '{}' in {}", document, ws.name()))?;
    services.directory.delete_document(id, user.user_id).await?;
    Ok(())
}
