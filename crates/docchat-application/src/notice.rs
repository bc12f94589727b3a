//! Toast-style notifications for the embedding UI.

use serde::Serialize;
use std::sync::Arc;
use strum::Display;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Callback type for notices (e.g. to show a toast).
pub type NoticeCallback = Arc<dyn Fn(Notice) + Send + Sync>;

/// Delivers notices to an optional callback; without one they are only logged.
#[derive(Clone, Default)]
pub struct Notifier {
    callback: Arc<RwLock<Option<NoticeCallback>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_callback(&self, callback: NoticeCallback) {
        *self.callback.write().await = Some(callback);
    }

    pub async fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "notice"),
        }

        let callback = self.callback.read().await.clone();
        if let Some(callback) = callback {
            callback(notice);
        }
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.notify(Notice::success(message)).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.notify(Notice::error(message)).await;
    }
}
