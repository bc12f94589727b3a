//! Error types for docchat.

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use crate::workspace::WorkspaceId;

/// The remote services the state layer talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Collaborator {
    /// Workspace and document CRUD service.
    #[strum(to_string = "core API")]
    CoreApi,
    /// Sign-in, sign-up and user management service.
    #[strum(to_string = "auth API")]
    AuthApi,
    /// Document ingestion and question answering service.
    #[strum(to_string = "LLM API")]
    LlmApi,
    /// Prompt history service.
    #[strum(to_string = "history API")]
    HistoryApi,
}

/// Coarse classification of [`DocchatError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ErrorKind {
    /// Rejected locally before any network call.
    Validation,
    /// Missing or rejected credentials.
    Authentication,
    /// A remote collaborator failed or returned `success = false`.
    Collaborator,
    /// Local persistence or configuration failure.
    Storage,
    /// Should not happen in normal operation.
    Internal,
}

/// A shared error type for the entire docchat workspace.
///
/// Every failure crossing a crate boundary is expressed as one of these
/// variants; [`DocchatError::kind`] maps them onto the coarse taxonomy used by
/// the orchestration layer to decide between surfacing and degrading.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocchatError {
    /// A workspace with the same (case-insensitive) name is already listed.
    #[error("A workspace with this name already exists: '{name}'")]
    DuplicateWorkspaceName { name: String },

    /// Only PDF uploads are accepted.
    #[error("Only PDF files are supported (got '{mime_type}')")]
    UnsupportedFileType { mime_type: String },

    /// The operation needs a selected workspace.
    #[error("Please select a workspace first")]
    NoWorkspaceSelected,

    /// No signed-in user.
    #[error("User not authenticated")]
    NotAuthenticated,

    /// The signed-in user lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The auth collaborator rejected the credentials.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// No LLM session token is known for the workspace.
    #[error("No session found. Please upload a document first.")]
    NoActiveSession { workspace_id: WorkspaceId },

    /// A collaborator call failed (transport error, non-2xx, or `success = false`).
    #[error("{collaborator} request failed: {message}")]
    Collaborator {
        collaborator: Collaborator,
        message: String,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocchatError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a collaborator failure.
    pub fn collaborator(collaborator: Collaborator, message: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator,
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a Migration error
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    // ============================================================================
    // Classification
    // ============================================================================

    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateWorkspaceName { .. }
            | Self::UnsupportedFileType { .. }
            | Self::NoWorkspaceSelected => ErrorKind::Validation,
            Self::NotAuthenticated | Self::Forbidden(_) | Self::InvalidCredentials(_) => {
                ErrorKind::Authentication
            }
            Self::NoActiveSession { .. } | Self::Collaborator { .. } => ErrorKind::Collaborator,
            Self::NotFound { .. }
            | Self::Io { .. }
            | Self::Serialization { .. }
            | Self::Config(_)
            | Self::Migration(_) => ErrorKind::Storage,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Check if this error was raised before any network call.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Check if this error is an authentication problem.
    pub fn is_authentication(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }

    /// Returns the failing collaborator, if any.
    pub fn collaborator_of(&self) -> Option<Collaborator> {
        match self {
            Self::Collaborator { collaborator, .. } => Some(*collaborator),
            Self::NoActiveSession { .. } => Some(Collaborator::LlmApi),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DocchatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DocchatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DocchatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for DocchatError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            MigrationError::EntityNotFound(id) => Self::not_found("entity", id),
            MigrationError::DeserializationError(_) | MigrationError::SerializationError(_) => {
                Self::Serialization {
                    format: "migration".to_string(),
                    message: err.to_string(),
                }
            }
            MigrationError::IoError { .. } => Self::Io {
                message: err.to_string(),
            },
            _ => Self::Migration(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, DocchatError>`.
pub type Result<T> = std::result::Result<T, DocchatError>;
