//! Upload and chat orchestration.
//!
//! Sequences the calls behind uploading a document and asking a question,
//! deciding per collaborator whether a failure is surfaced or only logged.

use std::sync::Arc;

use docchat_core::DocchatError;
use docchat_core::chat::{
    ChatEntry, ChatErrorKind, HistoryApi, HistorySession, PromptRecord, group_by_session,
};
use docchat_core::config::PromptDefaults;
use docchat_core::error::Result;
use docchat_core::llm::{LlmApi, SessionToken};
use docchat_core::user::UserId;
use docchat_core::workspace::{CoreApi, UploadFile, WorkspaceId};

use crate::auth_usecase::AuthUseCase;
use crate::directory::WorkspaceDirectory;
use crate::notice::Notifier;
use crate::session::SessionStore;
use crate::timeline::ChatTimelineStore;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub workspace_id: WorkspaceId,
    /// Whether the LLM service accepted the file and issued a session.
    pub session_established: bool,
}

pub struct ChatUseCase {
    core_api: Arc<dyn CoreApi>,
    llm_api: Arc<dyn LlmApi>,
    history_api: Arc<dyn HistoryApi>,
    auth: Arc<AuthUseCase>,
    directory: Arc<WorkspaceDirectory>,
    sessions: SessionStore,
    timeline: ChatTimelineStore,
    prompt_defaults: PromptDefaults,
    notifier: Notifier,
}

impl ChatUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        core_api: Arc<dyn CoreApi>,
        llm_api: Arc<dyn LlmApi>,
        history_api: Arc<dyn HistoryApi>,
        auth: Arc<AuthUseCase>,
        directory: Arc<WorkspaceDirectory>,
        sessions: SessionStore,
        timeline: ChatTimelineStore,
        prompt_defaults: PromptDefaults,
        notifier: Notifier,
    ) -> Self {
        Self {
            core_api,
            llm_api,
            history_api,
            auth,
            directory,
            sessions,
            timeline,
            prompt_defaults,
            notifier,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn timeline(&self) -> &ChatTimelineStore {
        &self.timeline
    }

    /// Uploads a PDF into the selected workspace.
    ///
    /// The LLM upload is best-effort: on failure no session is stored but the
    /// upload continues. Registering the document with the core API is
    /// required; its failure is returned and nothing is refreshed.
    pub async fn upload_document(&self, file: UploadFile) -> Result<UploadOutcome> {
        let selected = self
            .directory
            .selected()
            .await
            .ok_or(DocchatError::NoWorkspaceSelected)?;
        let workspace_id = selected.id().ok_or(DocchatError::NoWorkspaceSelected)?;

        if !file.is_pdf() {
            let err = DocchatError::UnsupportedFileType {
                mime_type: file.mime_type.clone(),
            };
            self.notifier.error(err.to_string()).await;
            return Err(err);
        }

        let session_established = match self.llm_api.upload_document(&file, workspace_id).await {
            Ok(token) => {
                tracing::info!(workspace_id, "LLM session established");
                self.sessions.set_session(workspace_id, token).await;
                true
            }
            Err(e) => {
                tracing::error!(workspace_id, error = %e, "LLM upload failed, continuing");
                false
            }
        };

        let user_id = selected.workspace.user_id;
        let document = file.to_document(&selected.workspace, user_id);
        if let Err(e) = self.core_api.register_document(&document).await {
            tracing::error!(workspace_id, error = %e, "Document registration failed");
            self.notifier.error(e.to_string()).await;
            return Err(e);
        }

        self.directory.refresh_after_change(user_id).await;
        self.notifier.success("Document uploaded successfully").await;
        Ok(UploadOutcome {
            workspace_id,
            session_established,
        })
    }

    /// Asks a question in a workspace.
    ///
    /// The user entry is appended before any network call. The returned bot
    /// entry is already in the timeline, right after the user entry; when the
    /// question could not be answered it carries an error classification and
    /// the error text as content. The exchange is then saved to history,
    /// whose failure is only logged.
    pub async fn send_message(&self, workspace_id: WorkspaceId, text: &str) -> Result<ChatEntry> {
        let user = self.auth.require_user().await?;

        let user_entry = self.timeline.append_user_entry(workspace_id, text).await;
        let session = self.sessions.get_session(workspace_id).await;

        let answer = match &session {
            Some(token) => self.llm_api.query(text, token).await,
            None => Err(DocchatError::NoActiveSession { workspace_id }),
        };

        let bot_entry = match answer {
            Ok(answer) => ChatEntry::bot(user_entry.turn, answer.answer, answer.sources),
            Err(e) => {
                tracing::warn!(workspace_id, error = %e, "Question not answered");
                ChatEntry::bot_error(user_entry.turn, ChatErrorKind::classify(&e), e.to_string())
            }
        };
        self.timeline
            .complete_turn(workspace_id, bot_entry.clone())
            .await;

        let record = self.prompt_record(workspace_id, user.user_id, text, &bot_entry, session);
        if let Err(e) = self.history_api.save_prompt(&record).await {
            tracing::warn!(workspace_id, error = %e, "Failed to save prompt history");
        }

        Ok(bot_entry)
    }

    /// Fills an empty timeline from the current session's history.
    ///
    /// Skipped when the timeline already has entries, nobody is signed in,
    /// or the workspace has no session. Fetch failures are logged. Returns
    /// whether history was applied.
    pub async fn load_history(&self, workspace_id: WorkspaceId) -> bool {
        if !self.timeline.is_empty(workspace_id).await {
            return false;
        }
        let Some(user) = self.auth.current_user().await else {
            return false;
        };
        let Some(session) = self.sessions.get_session(workspace_id).await else {
            return false;
        };

        match self
            .history_api
            .fetch_prompts(workspace_id, user.user_id, Some(session.as_str()))
            .await
        {
            Ok(records) => self.timeline.hydrate_from_history(workspace_id, records).await,
            Err(e) => {
                tracing::warn!(workspace_id, error = %e, "Failed to load chat history");
                false
            }
        }
    }

    /// Every history session of a workspace, newest first.
    ///
    /// Fetch failures are logged and yield an empty list.
    pub async fn history_sessions(&self, workspace_id: WorkspaceId) -> Result<Vec<HistorySession>> {
        let user = self.auth.require_user().await?;

        match self
            .history_api
            .fetch_prompts(workspace_id, user.user_id, None)
            .await
        {
            Ok(records) => Ok(group_by_session(records)),
            Err(e) => {
                tracing::warn!(workspace_id, error = %e, "Failed to fetch history sessions");
                Ok(Vec::new())
            }
        }
    }

    /// Soft-deletes a history session.
    pub async fn delete_history(&self, session_id: &str) -> Result<()> {
        self.auth.require_user().await?;
        match self.history_api.delete_session(session_id).await {
            Ok(()) => {
                self.notifier.success("Chat history deleted").await;
                Ok(())
            }
            Err(e) => {
                self.notifier.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    fn prompt_record(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        text: &str,
        reply: &ChatEntry,
        session: Option<SessionToken>,
    ) -> PromptRecord {
        PromptRecord {
            prompt_id: None,
            prompt_text: text.to_string(),
            response_text: reply.content.clone(),
            model_name: self.prompt_defaults.model_name.clone(),
            temperature: self.prompt_defaults.temperature,
            token_usage: self.prompt_defaults.token_usage,
            workspace_id,
            user_id,
            session_id: session.map(|s| s.as_str().to_string()),
            is_active: true,
        }
    }
}
