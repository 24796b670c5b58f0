//! Pairwise comparison of analysis records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::entities::AnalysisRecord;
use super::value_objects::Discipline;

/// Difference between a baseline and a target analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    #[schema(example = "cmp-1718000000000")]
    pub comparison_id: String,
    pub baseline: AnalysisSnapshot,
    pub target: AnalysisSnapshot,
    pub delta: ComparisonDelta,
}

/// Identity and headline figure of one side of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisSnapshot {
    pub id: String,
    pub completion: u8,
    pub timestamp: String,
}

impl From<&AnalysisRecord> for AnalysisSnapshot {
    fn from(record: &AnalysisRecord) -> Self {
        Self {
            id: record.analysis_id.clone(),
            completion: record.completion,
            timestamp: record.uploaded_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDelta {
    /// Completion change rounded to one decimal place
    pub completion: f64,
    pub risks_resolved: Vec<String>,
    pub new_risks: Vec<String>,
    /// Only disciplines whose progress changed
    #[schema(value_type = Object)]
    pub progress_by_discipline: BTreeMap<Discipline, i32>,
}

/// Compare `baseline` against `target`.
///
/// The caller decides which record is earlier; timestamps are not consulted.
/// Returns `None` when either side is missing.
pub fn compare(
    baseline: Option<&AnalysisRecord>,
    target: Option<&AnalysisRecord>,
) -> Option<Comparison> {
    Some(compare_at(baseline?, target?, Utc::now()))
}

pub(crate) fn compare_at(
    baseline: &AnalysisRecord,
    target: &AnalysisRecord,
    now: DateTime<Utc>,
) -> Comparison {
    Comparison {
        comparison_id: format!("cmp-{}", now.timestamp_millis()),
        baseline: AnalysisSnapshot::from(baseline),
        target: AnalysisSnapshot::from(target),
        delta: ComparisonDelta {
            completion: completion_delta(baseline.completion, target.completion),
            risks_resolved: difference(&baseline.risks, &target.risks),
            new_risks: difference(&target.risks, &baseline.risks),
            progress_by_discipline: progress_delta(baseline, target),
        },
    }
}

fn completion_delta(baseline: u8, target: u8) -> f64 {
    let diff = f64::from(target) - f64::from(baseline);
    (diff * 10.0).round() / 10.0
}

/// Items of `left` absent from `right`, in `left` order
fn difference(left: &[String], right: &[String]) -> Vec<String> {
    left.iter()
        .filter(|item| !right.contains(item))
        .cloned()
        .collect()
}

fn progress_delta(baseline: &AnalysisRecord, target: &AnalysisRecord) -> BTreeMap<Discipline, i32> {
    Discipline::ALL
        .iter()
        .filter_map(|discipline| {
            let before = i32::from(baseline.progress_by_discipline.get(*discipline));
            let after = i32::from(target.progress_by_discipline.get(*discipline));
            let delta = after - before;
            (delta != 0).then_some((*discipline, delta))
        })
        .collect()
}
