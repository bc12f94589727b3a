pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod state;
pub mod user;
pub mod workspace;

// Re-export common error type
pub use error::DocchatError;
