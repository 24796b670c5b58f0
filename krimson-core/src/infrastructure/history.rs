//! Per-project analysis history
//!
//! Records are kept most-recent-first and capped per project. Each project
//! owns its own lock so that appends for one project never wait on another;
//! the outer map lock is only held long enough to find or insert a slot.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::domain::analysis::AnalysisRecord;

/// Default number of analyses retained per project
pub const DEFAULT_MAX_RECORDS_PER_PROJECT: usize = 8;

/// Storage of analysis records grouped by project
#[async_trait]
pub trait AnalysisHistoryRepository: Send + Sync {
    /// Prepend a record, evicting the oldest beyond the retention cap.
    /// Empty project ids are ignored.
    async fn append(&self, project_id: &str, record: AnalysisRecord);

    /// Records for a project, most recent first
    async fn history(&self, project_id: &str) -> Vec<AnalysisRecord>;

    /// Look up one analysis within a project's retained history
    async fn find_by_id(&self, project_id: &str, analysis_id: &str) -> Option<AnalysisRecord>;
}

type ProjectSlot = Arc<Mutex<VecDeque<AnalysisRecord>>>;

/// Volatile history store; contents are lost on restart
pub struct InMemoryAnalysisHistory {
    projects: RwLock<HashMap<String, ProjectSlot>>,
    max_records: usize,
}

impl InMemoryAnalysisHistory {
    pub fn new(max_records: usize) -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            max_records: max_records.max(1),
        }
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    async fn slot(&self, project_id: &str) -> Option<ProjectSlot> {
        self.projects.read().await.get(project_id).cloned()
    }

    async fn slot_or_insert(&self, project_id: &str) -> ProjectSlot {
        if let Some(slot) = self.slot(project_id).await {
            return slot;
        }

        let mut projects = self.projects.write().await;
        projects
            .entry(project_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(VecDeque::with_capacity(self.max_records))))
            .clone()
    }
}

impl Default for InMemoryAnalysisHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECORDS_PER_PROJECT)
    }
}

#[async_trait]
impl AnalysisHistoryRepository for InMemoryAnalysisHistory {
    async fn append(&self, project_id: &str, record: AnalysisRecord) {
        if project_id.is_empty() {
            debug!("Ignoring analysis without a project id");
            return;
        }

        let slot = self.slot_or_insert(project_id).await;
        let mut records = slot.lock().await;
        records.push_front(record);
        records.truncate(self.max_records);

        debug!(
            project_id = %project_id,
            retained = records.len(),
            "Stored analysis in history"
        );
    }

    async fn history(&self, project_id: &str) -> Vec<AnalysisRecord> {
        if project_id.is_empty() {
            return Vec::new();
        }

        match self.slot(project_id).await {
            Some(slot) => slot.lock().await.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    async fn find_by_id(&self, project_id: &str, analysis_id: &str) -> Option<AnalysisRecord> {
        let slot = self.slot(project_id).await?;
        let records = slot.lock().await;
        records
            .iter()
            .find(|record| record.analysis_id == analysis_id)
            .cloned()
    }
}
