//! Prompt history records and the history collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::message::{ChatEntry, Turn};
use crate::error::Result;
use crate::user::UserId;
use crate::workspace::WorkspaceId;

/// One persisted question/answer exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Backend-assigned ordering key; absent before the record is saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_id: Option<i64>,
    pub prompt_text: String,
    pub response_text: String,
    pub model_name: String,
    pub temperature: f64,
    pub token_usage: u32,
    #[serde(rename = "ws_id")]
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    /// LLM session the exchange happened in, if one existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub is_active: bool,
}

impl PromptRecord {
    /// Ordering key used when sorting history; unsaved records sort first.
    pub fn ordering_key(&self) -> i64 {
        self.prompt_id.unwrap_or(0)
    }

    /// Expands the record into the user entry and bot reply of one turn.
    pub fn to_entries(&self, turn: Turn) -> [ChatEntry; 2] {
        [
            ChatEntry::user(turn, self.prompt_text.clone()),
            ChatEntry::bot(turn, self.response_text.clone(), Vec::new()),
        ]
    }
}

/// Prompt records of one LLM session.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySession {
    pub session_id: String,
    /// Sorted by ordering key, oldest first.
    pub prompts: Vec<PromptRecord>,
}

impl HistorySession {
    /// Ordering key of the newest prompt in the session.
    pub fn latest_key(&self) -> i64 {
        self.prompts.last().map(PromptRecord::ordering_key).unwrap_or(0)
    }
}

/// Groups records by session id.
///
/// Prompts inside a group are sorted ascending by ordering key; groups are
/// sorted by their newest prompt, most recent first.
pub fn group_by_session(records: Vec<PromptRecord>) -> Vec<HistorySession> {
    let mut grouped: HashMap<String, Vec<PromptRecord>> = HashMap::new();
    for record in records {
        grouped
            .entry(record.session_id.clone().unwrap_or_default())
            .or_default()
            .push(record);
    }

    let mut sessions: Vec<HistorySession> = grouped
        .into_iter()
        .map(|(session_id, mut prompts)| {
            prompts.sort_by_key(PromptRecord::ordering_key);
            HistorySession {
                session_id,
                prompts,
            }
        })
        .collect();

    sessions.sort_by(|a, b| {
        b.latest_key()
            .cmp(&a.latest_key())
            .then_with(|| a.session_id.cmp(&b.session_id))
    });
    sessions
}

/// Remote prompt-history service.
///
/// Every failure of this collaborator is non-fatal to chat; callers log and
/// move on.
#[async_trait]
pub trait HistoryApi: Send + Sync {
    /// Persists one exchange.
    async fn save_prompt(&self, record: &PromptRecord) -> Result<()>;

    /// Fetches active records of a workspace for a user, optionally narrowed
    /// to one session.
    async fn fetch_prompts(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        session_id: Option<&str>,
    ) -> Result<Vec<PromptRecord>>;

    /// Soft-deletes every record of a session.
    async fn delete_session(&self, session_id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(prompt_id: Option<i64>, session: &str, text: &str) -> PromptRecord {
        PromptRecord {
            prompt_id,
            prompt_text: text.to_string(),
            response_text: format!("re: {}", text),
            model_name: "llama3.2:latest".to_string(),
            temperature: 1.0,
            token_usage: 100,
            workspace_id: 1,
            user_id: 1,
            session_id: Some(session.to_string()),
            is_active: true,
        }
    }

    #[test]
    fn test_group_by_session_orders_groups_and_prompts() {
        let records = vec![
            record(Some(5), "s-old", "b"),
            record(Some(9), "s-new", "d"),
            record(Some(2), "s-old", "a"),
            record(Some(7), "s-new", "c"),
        ];

        let sessions = group_by_session(records);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].session_id, "s-new");
        assert_eq!(sessions[1].session_id, "s-old");

        let texts: Vec<_> = sessions[1]
            .prompts
            .iter()
            .map(|p| p.prompt_text.as_str())
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert_eq!(sessions[0].latest_key(), 9);
    }

    #[test]
    fn test_to_entries_share_turn() {
        let [user, bot] = record(Some(1), "s", "hi").to_entries(4);
        assert!(user.is_user());
        assert!(bot.is_bot());
        assert_eq!(user.turn, 4);
        assert_eq!(bot.turn, 4);
        assert_eq!(bot.content, "re: hi");
    }
}
