//! Normalization of loosely-typed analysis input
//!
//! Every function in this module is total: malformed input degrades to a
//! documented default instead of failing.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::entities::{HeatmapEntry, Task};
use super::payload::{present, text, text_of};
use super::value_objects::{Discipline, ProgressByDiscipline, TaskPriority, TaskStatus};
use crate::domain::LenientEnum;

/// Maximum number of heatmap days kept on a record
pub const MAX_HEATMAP_ENTRIES: usize = 30;

/// Focus used for heatmap entries that do not name one
pub const DEFAULT_HEATMAP_FOCUS: &str = "Frontend";

/// Interpret a JSON value as a number the way a loose client would:
/// numbers as-is, numeric strings parsed (blank is zero), booleans as 1/0,
/// null as zero. Arrays, objects and unparsable strings are `None`.
pub fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };

    (!number.is_nan()).then_some(number)
}

/// Round and clamp to an integer percentage in [0, 100]. Non-numeric input is 0.
pub fn clamp_percentage(value: &Value) -> u8 {
    numeric(value).map(clamp_percentage_f64).unwrap_or(0)
}

/// Round and clamp a float to [0, 100]
pub fn clamp_percentage_f64(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Non-negative integer count, or `None` when the value is absent or not numeric
pub fn to_count(value: Option<&Value>) -> Option<u64> {
    let value = value.filter(|v| !v.is_null())?;
    let number = numeric(value)?;
    Some(number.round().clamp(0.0, u64::MAX as f64) as u64)
}

/// JSON truthiness: false, 0, NaN, "" and null are false; everything else true
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Keep textual items of a list, stringifying numbers and booleans.
pub fn normalize_string_list(items: Option<&[Value]>) -> Vec<String> {
    items
        .unwrap_or_default()
        .iter()
        .filter_map(text)
        .collect()
}

/// Map task-like values onto [`Task`].
///
/// `null` and `false` entries are dropped. Ids are kept when present and not
/// already used in this list; otherwise a synthetic id is assigned. A bare
/// string entry is taken as the task title.
pub fn normalize_tasks(tasks: Option<&[Value]>, now: DateTime<Utc>) -> Vec<Task> {
    let stamp = now.timestamp_millis();
    let mut seen_ids = HashSet::new();

    tasks
        .unwrap_or_default()
        .iter()
        .filter(|task| !matches!(task, Value::Null | Value::Bool(false)))
        .enumerate()
        .map(|(index, task)| {
            let empty = Map::new();
            let (fields, bare_title) = match task {
                Value::Object(map) => (map, None),
                other => (&empty, text(other)),
            };

            let id = text_of(fields, &["id", "taskId"])
                .filter(|id| !seen_ids.contains(id))
                .unwrap_or_else(|| format!("llm-task-{stamp}-{index}"));
            seen_ids.insert(id.clone());

            let status = TaskStatus::restrict(text_of(fields, &["status", "state"]).as_deref());
            let priority = TaskPriority::restrict(text_of(fields, &["priority"]).as_deref());

            Task {
                id,
                title: text_of(fields, &["title", "task"])
                    .or(bare_title)
                    .unwrap_or_else(|| format!("Task {}", index + 1)),
                status,
                priority,
                detail: text_of(fields, &["detail", "description"]),
            }
        })
        .collect()
}

/// Project an arbitrary key/value map onto the five tracked disciplines.
///
/// Keys are matched case-insensitively, values clamped, unknown keys dropped
/// and missing disciplines set to 0.
pub fn normalize_progress(progress: Option<&Map<String, Value>>) -> ProgressByDiscipline {
    let mut normalized = ProgressByDiscipline::default();

    for (key, value) in progress.into_iter().flatten() {
        let key = key.to_lowercase();
        if let Some(discipline) = Discipline::ALL.iter().find(|d| d.as_str() == key) {
            normalized.set(*discipline, clamp_percentage(value));
        }
    }

    normalized
}

/// Truncate to [`MAX_HEATMAP_ENTRIES`] and fill missing fields.
///
/// A missing date becomes `index` days before `now`.
pub fn normalize_heatmap(entries: Option<&[Value]>, now: DateTime<Utc>) -> Vec<HeatmapEntry> {
    let empty = Map::new();

    entries
        .unwrap_or_default()
        .iter()
        .take(MAX_HEATMAP_ENTRIES)
        .enumerate()
        .map(|(index, entry)| {
            let fields = entry.as_object().unwrap_or(&empty);

            HeatmapEntry {
                date: text_of(fields, &["date"]).unwrap_or_else(|| days_before(now, index)),
                focus: text_of(fields, &["focus", "area"])
                    .unwrap_or_else(|| DEFAULT_HEATMAP_FOCUS.to_string()),
                value: present(fields, &["value", "intensity"])
                    .map(clamp_percentage)
                    .unwrap_or(0),
                risk: present(fields, &["risk", "isRisk"]).is_some_and(truthy),
            }
        })
        .collect()
}

/// ISO-8601 timestamp with millisecond precision
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ISO-8601 timestamp `days` days before `now`
pub fn days_before(now: DateTime<Utc>, days: usize) -> String {
    iso_timestamp(now - Duration::days(days as i64))
}
