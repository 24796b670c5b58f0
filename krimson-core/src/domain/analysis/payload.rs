//! Loosely-typed analysis input
//!
//! [`RawAnalysisPayload`] is what we know about an analysis *before*
//! normalization: every field is optional and most are kept as raw JSON so
//! that a mistyped value degrades one field instead of the whole payload.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Fully-optional analysis payload, typically produced by an LLM.
///
/// Built from any JSON value; non-objects produce an empty payload.
/// Alternative key spellings seen in model output are accepted and the
/// first non-null spelling wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawAnalysisPayload {
    pub project_id: Option<String>,
    pub analysis_id: Option<String>,
    pub project_name: Option<String>,
    pub uploaded_at: Option<String>,
    pub completion: Option<Value>,
    pub summary: Option<String>,
    pub missing_components: Option<Vec<Value>>,
    pub recommended_tasks: Option<Vec<Value>>,
    pub risks: Option<Vec<Value>>,
    pub timeline_estimate: Option<String>,
    pub tech_stack: Option<Vec<Value>>,
    pub progress_by_discipline: Option<Map<String, Value>>,
    pub insights: RawInsights,
    pub activity_heatmap: Option<Vec<Value>>,
    pub security_concerns: Option<Vec<Value>>,
    pub performance_issues: Option<Vec<Value>>,
}

/// Optional insight counters gathered from `insights` or top-level keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInsights {
    pub total_files: Option<Value>,
    pub todo_count: Option<Value>,
    pub documentation: Option<String>,
    pub detected_language: Option<String>,
}

impl From<Value> for RawAnalysisPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from(map),
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for RawAnalysisPayload {
    fn from(map: Map<String, Value>) -> Self {
        let nested = map.get("insights").and_then(Value::as_object);
        let from_nested = |key: &str| nested.and_then(|insights| present(insights, &[key]));

        let insights = RawInsights {
            total_files: from_nested("totalFiles").cloned(),
            todo_count: from_nested("todoCount")
                .or_else(|| present(&map, &["todoCount"]))
                .cloned(),
            documentation: from_nested("documentation")
                .and_then(text)
                .or_else(|| text_of(&map, &["documentation", "documentationStatus"])),
            detected_language: from_nested("detectedLanguage").and_then(text),
        };

        Self {
            project_id: text_of(&map, &["projectId"]),
            analysis_id: text_of(&map, &["analysisId"]),
            project_name: text_of(&map, &["projectName"]),
            uploaded_at: text_of(&map, &["uploadedAt"]),
            completion: present(&map, &["completion", "completionEstimate"]).cloned(),
            summary: text_of(&map, &["summary", "projectSummary"]),
            missing_components: list_of(&map, &["missingComponents", "missing"]),
            recommended_tasks: list_of(&map, &["recommendedTasks"]),
            risks: list_of(&map, &["risks"]),
            timeline_estimate: text_of(&map, &["timelineEstimate", "timeline"]),
            tech_stack: list_of(&map, &["techStack"]),
            progress_by_discipline: present(&map, &["progressByDiscipline", "progressInsights"])
                .and_then(Value::as_object)
                .cloned(),
            insights,
            activity_heatmap: list_of(&map, &["activityHeatmap"]),
            security_concerns: list_of(&map, &["securityConcerns"]),
            performance_issues: list_of(&map, &["performanceIssues"]),
        }
    }
}

/// First non-null value among `keys`
pub(crate) fn present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

/// Scalar rendered as text. Empty strings count as missing.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First key holding usable text
pub(crate) fn text_of(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|key| map.get(*key)).find_map(text)
}

fn list_of(map: &Map<String, Value>, keys: &[&str]) -> Option<Vec<Value>> {
    present(map, keys)
        .and_then(Value::as_array)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_is_empty_payload() {
        assert_eq!(
            RawAnalysisPayload::from(json!(["not", "an", "object"])),
            RawAnalysisPayload::default()
        );
        assert_eq!(
            RawAnalysisPayload::from(Value::Null),
            RawAnalysisPayload::default()
        );
    }

    #[test]
    fn test_aliases_are_accepted() {
        let payload = RawAnalysisPayload::from(json!({
            "completionEstimate": 64,
            "projectSummary": "Checkout flow is wired",
            "missing": ["Auth"],
            "timeline": "2 weeks",
            "progressInsights": { "Frontend": 70 },
            "todoCount": 4,
            "documentationStatus": "partial"
        }));

        assert_eq!(payload.completion, Some(json!(64)));
        assert_eq!(payload.summary.as_deref(), Some("Checkout flow is wired"));
        assert_eq!(payload.missing_components, Some(vec![json!("Auth")]));
        assert_eq!(payload.timeline_estimate.as_deref(), Some("2 weeks"));
        assert!(payload.progress_by_discipline.is_some());
        assert_eq!(payload.insights.todo_count, Some(json!(4)));
        assert_eq!(payload.insights.documentation.as_deref(), Some("partial"));
    }

    #[test]
    fn test_primary_key_wins_over_alias() {
        let payload = RawAnalysisPayload::from(json!({
            "completion": 10,
            "completionEstimate": 90,
            "summary": "",
            "projectSummary": "fallback summary"
        }));

        assert_eq!(payload.completion, Some(json!(10)));
        assert_eq!(payload.summary.as_deref(), Some("fallback summary"));
    }

    #[test]
    fn test_null_primary_falls_through_to_alias() {
        let payload = RawAnalysisPayload::from(json!({
            "completion": null,
            "completionEstimate": "55"
        }));
        assert_eq!(payload.completion, Some(json!("55")));
    }

    #[test]
    fn test_mistyped_list_is_ignored() {
        let payload = RawAnalysisPayload::from(json!({ "risks": "everything" }));
        assert!(payload.risks.is_none());
    }

    #[test]
    fn test_deserializes_from_json_text() {
        let payload: RawAnalysisPayload =
            serde_json::from_str(r#"{"insights":{"totalFiles":12,"detectedLanguage":"Rust"}}"#)
                .unwrap();
        assert_eq!(payload.insights.total_files, Some(json!(12)));
        assert_eq!(payload.insights.detected_language.as_deref(), Some("Rust"));
    }
}
