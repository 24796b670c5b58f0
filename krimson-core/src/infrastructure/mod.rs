//! In-memory stores backing the tracker

pub mod activity_log;
pub mod history;

pub use activity_log::ActivityLog;
pub use history::{AnalysisHistoryRepository, InMemoryAnalysisHistory};
