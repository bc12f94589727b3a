//! In-memory representation of a file picked for upload.

use serde::{Deserialize, Serialize};

use super::model::{Document, Workspace};
use crate::user::UserId;

const DEFAULT_EXTENSION: &str = "pdf";

/// A file selected by the user, held in memory until both collaborators have
/// seen it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    /// File name as chosen by the user, e.g. `report.final.pdf`.
    pub name: String,
    /// MIME type reported by the picker, e.g. `application/pdf`.
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Whether the MIME type indicates a PDF.
    pub fn is_pdf(&self) -> bool {
        self.mime_type.to_lowercase().contains("pdf")
    }

    /// Extension after the last dot, defaulting to `pdf` when the name has none.
    pub fn extension(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
            _ => DEFAULT_EXTENSION,
        }
    }

    /// Builds the document metadata registered with the core API.
    pub fn to_document(&self, workspace: &Workspace, user_id: UserId) -> Document {
        Document {
            id: None,
            path: String::new(),
            name: self.name.clone(),
            extension: self.extension().to_string(),
            purpose: String::new(),
            workspace_id: workspace.id.unwrap_or_default(),
            user_id,
            is_active: true,
        }
    }
}
