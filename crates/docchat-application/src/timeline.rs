//! Per-workspace chat timelines.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use docchat_core::chat::{ChatEntry, PromptRecord, Turn};
use docchat_core::llm::SourceCitation;
use docchat_core::workspace::WorkspaceId;

#[derive(Debug, Default)]
struct Timeline {
    entries: Vec<ChatEntry>,
    next_turn: Turn,
}

impl Timeline {
    fn reserve_turn(&mut self) -> Turn {
        let turn = self.next_turn;
        self.next_turn += 1;
        turn
    }

    /// Index just past the last entry whose turn is `<= turn`.
    fn insertion_point(&self, turn: Turn) -> usize {
        self.entries
            .iter()
            .rposition(|e| e.turn <= turn)
            .map_or(0, |i| i + 1)
    }
}

/// In-memory chat timelines, one per workspace.
///
/// Entries are only ever added. Within a workspace they are kept in turn
/// order: a user entry reserves a turn, and the bot reply for that turn is
/// placed right after it even if later turns were appended meanwhile.
#[derive(Clone, Default)]
pub struct ChatTimelineStore {
    timelines: Arc<RwLock<HashMap<WorkspaceId, Timeline>>>,
}

impl ChatTimelineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user entry under a freshly reserved turn.
    pub async fn append_user_entry(
        &self,
        workspace_id: WorkspaceId,
        text: impl Into<String>,
    ) -> ChatEntry {
        let mut timelines = self.timelines.write().await;
        let timeline = timelines.entry(workspace_id).or_default();
        let entry = ChatEntry::user(timeline.reserve_turn(), text);
        timeline.entries.push(entry.clone());
        entry
    }

    /// Appends a standalone bot entry at the end under its own turn.
    pub async fn append_bot_entry(
        &self,
        workspace_id: WorkspaceId,
        text: impl Into<String>,
        sources: Vec<SourceCitation>,
    ) -> ChatEntry {
        let mut timelines = self.timelines.write().await;
        let timeline = timelines.entry(workspace_id).or_default();
        let entry = ChatEntry::bot(timeline.reserve_turn(), text, sources);
        timeline.entries.push(entry.clone());
        entry
    }

    /// Places the reply for `entry.turn` directly after that turn's entries.
    pub async fn complete_turn(&self, workspace_id: WorkspaceId, entry: ChatEntry) {
        let mut timelines = self.timelines.write().await;
        let timeline = timelines.entry(workspace_id).or_default();
        let index = timeline.insertion_point(entry.turn);
        timeline.entries.insert(index, entry);
    }

    /// Replaces an empty timeline with history.
    ///
    /// Records are sorted by their ordering key and each becomes a user entry
    /// followed by its bot reply. Returns `false` and leaves the timeline
    /// untouched when it already has entries.
    pub async fn hydrate_from_history(
        &self,
        workspace_id: WorkspaceId,
        mut records: Vec<PromptRecord>,
    ) -> bool {
        let mut timelines = self.timelines.write().await;
        let timeline = timelines.entry(workspace_id).or_default();
        if !timeline.entries.is_empty() {
            tracing::debug!(workspace_id, "Timeline not empty, skipping history");
            return false;
        }

        records.sort_by_key(PromptRecord::ordering_key);
        for record in &records {
            let turn = timeline.reserve_turn();
            timeline.entries.extend(record.to_entries(turn));
        }
        tracing::debug!(workspace_id, count = records.len(), "Hydrated timeline from history");
        true
    }

    /// Snapshot of a workspace's entries in display order.
    pub async fn entries(&self, workspace_id: WorkspaceId) -> Vec<ChatEntry> {
        self.timelines
            .read()
            .await
            .get(&workspace_id)
            .map(|t| t.entries.clone())
            .unwrap_or_default()
    }

    pub async fn is_empty(&self, workspace_id: WorkspaceId) -> bool {
        self.timelines
            .read()
            .await
            .get(&workspace_id)
            .is_none_or(|t| t.entries.is_empty())
    }

    /// Drops every timeline (on logout).
    pub async fn clear(&self) {
        self.timelines.write().await.clear();
    }
}
