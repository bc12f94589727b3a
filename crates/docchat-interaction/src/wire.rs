//! Request and response bodies as the backends spell them.

use serde::{Deserialize, Serialize};

use docchat_core::workspace::{Document, DocumentId, Workspace, WorkspaceId};

/// Response envelope shared by the core, auth and history services.
///
/// The auth service names the message field `msg`; some responses carry both.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl<T> Envelope<T> {
    /// The first non-empty of `message` and `msg`.
    pub fn message(&self) -> Option<&str> {
        [self.message.as_deref(), self.msg.as_deref()]
            .into_iter()
            .flatten()
            .find(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspacePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_id: Option<WorkspaceId>,
    pub ws_name: String,
    pub user_id: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<&Workspace> for WorkspacePayload {
    fn from(ws: &Workspace) -> Self {
        Self {
            ws_id: ws.id,
            ws_name: ws.name.clone(),
            user_id: ws.user_id,
            is_active: ws.is_active,
        }
    }
}

impl From<WorkspacePayload> for Workspace {
    fn from(payload: WorkspacePayload) -> Self {
        Workspace {
            id: payload.ws_id,
            name: payload.ws_name,
            user_id: payload.user_id,
            is_active: payload.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_doc_id: Option<DocumentId>,
    #[serde(default)]
    pub ws_doc_path: String,
    pub ws_doc_name: String,
    #[serde(default)]
    pub ws_doc_extn: String,
    #[serde(default)]
    pub ws_doc_for: String,
    pub ws_id: WorkspaceId,
    pub user_id: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<&Document> for DocumentPayload {
    fn from(doc: &Document) -> Self {
        Self {
            ws_doc_id: doc.id,
            ws_doc_path: doc.path.clone(),
            ws_doc_name: doc.name.clone(),
            ws_doc_extn: doc.extension.clone(),
            ws_doc_for: doc.purpose.clone(),
            ws_id: doc.workspace_id,
            user_id: doc.user_id,
            is_active: doc.is_active,
        }
    }
}

impl From<DocumentPayload> for Document {
    fn from(payload: DocumentPayload) -> Self {
        Document {
            id: payload.ws_doc_id,
            path: payload.ws_doc_path,
            name: payload.ws_doc_name,
            extension: payload.ws_doc_extn,
            purpose: payload.ws_doc_for,
            workspace_id: payload.ws_id,
            user_id: payload.user_id,
            is_active: payload.is_active,
        }
    }
}

/// Soft-delete body for workspaces.
#[derive(Debug, Serialize)]
pub struct WorkspaceDeactivation {
    pub ws_id: WorkspaceId,
    pub is_active: bool,
}

/// Soft-delete body for documents.
#[derive(Debug, Serialize)]
pub struct DocumentDeactivation {
    pub ws_doc_id: DocumentId,
    pub is_active: bool,
}

/// Soft-delete body for history sessions.
#[derive(Debug, Serialize)]
pub struct SessionDeactivation<'a> {
    pub session_id: &'a str,
    pub is_active: bool,
}

/// Response of the LLM upload endpoint.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(default = "default_active")]
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_accepts_msg_alias() {
        let envelope: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"success": false, "msg": "bad password"}"#).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message(), Some("bad password"));
    }

    #[test]
    fn test_envelope_with_both_message_keys_decodes() {
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(
            r#"{"success": true, "data": null, "message": "ok", "msg": "also ok"}"#,
        )
        .unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message(), Some("ok"));
    }

    #[test]
    fn test_envelope_falls_back_to_msg_when_message_is_empty() {
        let envelope: Envelope<()> =
            serde_json::from_str(r#"{"success": false, "message": "", "msg": "denied"}"#).unwrap();
        assert_eq!(envelope.message(), Some("denied"));
    }

    #[test]
    fn test_document_payload_maps_backend_names() {
        let payload: DocumentPayload = serde_json::from_str(
            r#"{"ws_doc_id": 4, "ws_doc_path": "/s/4", "ws_doc_name": "a.pdf",
                "ws_doc_extn": "pdf", "ws_doc_for": "", "ws_id": 2, "user_id": 1, "is_active": true}"#,
        )
        .unwrap();
        let doc = Document::from(payload);
        assert_eq!(doc.id, Some(4));
        assert_eq!(doc.name, "a.pdf");
        assert_eq!(doc.workspace_id, 2);
    }
}
