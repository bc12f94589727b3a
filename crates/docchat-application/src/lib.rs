//! Application layer for docchat.
//!
//! Holds the in-memory stores (sessions, chat timelines, workspace directory)
//! and the use cases that sequence calls to the remote collaborators.

pub mod admin_usecase;
pub mod auth_usecase;
pub mod chat_usecase;
pub mod directory;
pub mod notice;
pub mod services;
pub mod session;
pub mod timeline;

#[cfg(test)]
mod test_support;

pub use admin_usecase::AdminUseCase;
pub use auth_usecase::AuthUseCase;
pub use chat_usecase::{ChatUseCase, UploadOutcome};
pub use directory::WorkspaceDirectory;
pub use notice::{Notice, NoticeCallback, NoticeLevel, Notifier};
pub use services::{Collaborators, DocchatServices};
pub use session::SessionStore;
pub use timeline::ChatTimelineStore;
