use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque credential returned by the LLM service after a document upload.
///
/// Required for every subsequent query against that workspace's documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// A passage the LLM used to build its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub source_id: String,
    pub summary: String,
    /// Originating file name.
    pub file: String,
    pub page: u32,
}

/// Answer to a question, with the passages it cites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmAnswer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceCitation>,
}
