//! Analysis domain: records, loose payloads, normalization and comparison

pub mod comparison;
pub mod entities;
pub mod factory;
pub mod normalization;
pub mod payload;
pub mod value_objects;

pub use comparison::{AnalysisSnapshot, Comparison, ComparisonDelta, compare};
pub use entities::{AnalysisRecord, HeatmapEntry, Insights, Task};
pub use factory::AnalysisRecordFactory;
pub use payload::{RawAnalysisPayload, RawInsights};
pub use value_objects::{
    Discipline, DocumentationState, ProgressByDiscipline, TaskPriority, TaskStatus,
};
