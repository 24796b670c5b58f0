//! Capped operator activity log

use std::collections::VecDeque;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::activity::ActivityLogEntry;

/// Default number of entries retained
pub const DEFAULT_MAX_ENTRIES: usize = 200;

/// Newest-first, append-only log of operator notes
pub struct ActivityLog {
    entries: RwLock<VecDeque<ActivityLogEntry>>,
    max_entries: usize,
}

impl ActivityLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Stamp and store a note. Unknown levels are recorded as `info`.
    pub async fn record(&self, message: impl Into<String>, level: Option<&str>) -> ActivityLogEntry {
        let entry = ActivityLogEntry::new(message, level);

        let mut entries = self.entries.write().await;
        entries.push_front(entry.clone());
        entries.truncate(self.max_entries);

        debug!(id = %entry.id, level = ?entry.level, "Recorded activity log entry");
        entry
    }

    /// All retained entries, newest first
    pub async fn list(&self) -> Vec<ActivityLogEntry> {
        self.entries.read().await.iter().cloned().collect()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}
