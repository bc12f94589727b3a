//! Chat domain module.
//!
//! # Module Structure
//!
//! - `message`: timeline entry types (`ChatEntry`, `ChatAuthor`, `ChatErrorKind`)
//! - `history`: prompt history records and the history collaborator trait

pub mod history;
pub mod message;

pub use history::{HistoryApi, HistorySession, PromptRecord, group_by_session};
pub use message::{ChatAuthor, ChatEntry, ChatErrorKind, Turn};
