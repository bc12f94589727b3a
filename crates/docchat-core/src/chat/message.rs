//! Chat timeline entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

use crate::error::DocchatError;
use crate::llm::SourceCitation;

/// Per-workspace sequence number of a user/bot exchange.
pub type Turn = u64;

/// Who wrote a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatAuthor {
    User,
    Bot,
}

/// Classification of a bot entry that reports a failure instead of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ChatErrorKind {
    /// No session token was known for the workspace.
    NoActiveSession,
    /// The LLM query itself failed.
    QueryFailed,
}

impl ChatErrorKind {
    /// Classifies an error raised while answering a message.
    pub fn classify(err: &DocchatError) -> Self {
        match err {
            DocchatError::NoActiveSession { .. } => Self::NoActiveSession,
            _ => Self::QueryFailed,
        }
    }
}

/// One message in a workspace's chat timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Displayable text. For error entries this is the error description.
    pub content: String,
    pub author: ChatAuthor,
    pub created_at: DateTime<Utc>,
    /// Exchange this entry belongs to; a user entry and its reply share a turn.
    pub turn: Turn,
    #[serde(default)]
    pub sources: Vec<SourceCitation>,
    /// Set when this bot entry reports a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ChatErrorKind>,
}

impl ChatEntry {
    fn new(turn: Turn, author: ChatAuthor, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            author,
            created_at: Utc::now(),
            turn,
            sources: Vec::new(),
            error: None,
        }
    }

    pub fn user(turn: Turn, content: impl Into<String>) -> Self {
        Self::new(turn, ChatAuthor::User, content)
    }

    pub fn bot(turn: Turn, content: impl Into<String>, sources: Vec<SourceCitation>) -> Self {
        Self {
            sources,
            ..Self::new(turn, ChatAuthor::Bot, content)
        }
    }

    /// A bot entry carrying an error description as its content.
    pub fn bot_error(turn: Turn, kind: ChatErrorKind, content: impl Into<String>) -> Self {
        Self {
            error: Some(kind),
            ..Self::new(turn, ChatAuthor::Bot, content)
        }
    }

    pub fn is_user(&self) -> bool {
        self.author == ChatAuthor::User
    }

    pub fn is_bot(&self) -> bool {
        self.author == ChatAuthor::Bot
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
