//! Interactive chat loop over one workspace.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;

use anyhow::{Context as _, Result};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use docchat_application::DocchatServices;
use docchat_core::DocchatError;
use docchat_core::chat::{ChatAuthor, ChatEntry};
use docchat_core::workspace::{UploadFile, WorkspaceId};

use super::workspace::resolve;

const COMMANDS: [&str; 4] = ["/upload", "/history", "/forget", "/quit"];

#[derive(Clone)]
struct ChatHelper;

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ChatHelper {}

/// Reads a file from disk, guessing its MIME type from the extension.
pub async fn load_upload(path: &Path) -> Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("Upload path has no file name")?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(UploadFile::new(name, mime.essence_str(), bytes))
}

fn print_entry(entry: &ChatEntry) {
    match entry.author {
        ChatAuthor::User => println!("{} {}", "you:".bold(), entry.content),
        ChatAuthor::Bot if entry.is_error() => println!("{}", entry.content.red()),
        ChatAuthor::Bot => {
            for line in entry.content.lines() {
                println!("{}", line.bright_blue());
            }
            for source in &entry.sources {
                println!(
                    "  {}",
                    format!("[{} p.{}] {}", source.file, source.page, source.summary).bright_black()
                );
            }
        }
    }
}

async fn upload(services: &DocchatServices, path: &Path) -> Result<()> {
    let file = load_upload(path).await?;
    let outcome = services.chat.upload_document(file).await?;
    if !outcome.session_established {
        println!(
            "{}",
            "Document saved, but the LLM service did not open a session".yellow()
        );
    }
    Ok(())
}

async fn show_history(services: &DocchatServices, workspace_id: WorkspaceId) -> Result<()> {
    let sessions = services.chat.history_sessions(workspace_id).await?;
    if sessions.is_empty() {
        println!("{}", "No history".bright_black());
    }
    for session in sessions {
        println!("{}", session.session_id.bold());
        for prompt in &session.prompts {
            println!("  {} {}", ">".bright_black(), prompt.prompt_text);
        }
    }
    Ok(())
}

async fn handle_command(
    services: &DocchatServices,
    workspace_id: WorkspaceId,
    line: &str,
) -> Result<bool> {
    let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
    let arg = arg.trim();
    match command {
        "/quit" => return Ok(false),
        "/upload" if !arg.is_empty() => upload(services, Path::new(arg)).await?,
        "/history" => show_history(services, workspace_id).await?,
        "/forget" if !arg.is_empty() => services.chat.delete_history(arg).await?,
        _ => println!("{}", format!("Commands: {}", COMMANDS.join(", ")).bright_black()),
    }
    Ok(true)
}

pub async fn run(services: &DocchatServices, key: &str, upload_path: Option<&Path>) -> Result<()> {
    services.auth.require_user().await?;
    let workspace = resolve(services, key).await?;
    let workspace_id = workspace.id().context("Workspace has no id")?;
    println!("Chatting in {}", workspace.name().bold());
    services.directory.select_workspace(workspace).await;

    if let Some(path) = upload_path {
        upload(services, path).await?;
    }

    if services.chat.load_history(workspace_id).await {
        for entry in services.chat.timeline().entries(workspace_id).await {
            print_entry(&entry);
        }
    }

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper));

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        if line.starts_with('/') {
            match handle_command(services, workspace_id, line).await {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "Command failed");
                    // Collaborator and validation failures already surfaced as notices
                    if e.downcast_ref::<DocchatError>().is_none() {
                        eprintln!("{}", e.to_string().red());
                    }
                    continue;
                }
            }
        }

        let reply = services.chat.send_message(workspace_id, line).await?;
        print_entry(&reply);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_upload_guesses_pdf_mime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.final.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let file = load_upload(&path).await.unwrap();

        assert_eq!(file.name, "report.final.pdf");
        assert!(file.is_pdf());
        assert_eq!(file.extension(), "pdf");
        assert_eq!(file.bytes, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_load_upload_unknown_extension_is_not_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.zzz");
        std::fs::write(&path, b"hi").unwrap();

        let file = load_upload(&path).await.unwrap();
        assert_eq!(file.mime_type, "application/octet-stream");
        assert!(!file.is_pdf());
    }
}
