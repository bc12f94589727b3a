//! LLM collaborator domain module.
//!
//! The LLM service ingests uploaded documents, hands back an opaque session
//! token, and answers questions scoped to that token.

pub mod api;
pub mod model;

pub use api::LlmApi;
pub use model::{LlmAnswer, SessionToken, SourceCitation};
