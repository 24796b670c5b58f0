//! Unit tests for the analysis prompt

use krimson_llm::prompts::{PROJECT_ANALYSIS_PROMPT, PromptBuilder};

#[test]
fn test_prompt_has_placeholders() {
    assert!(PROJECT_ANALYSIS_PROMPT.contains("{project_name}"));
    assert!(PROJECT_ANALYSIS_PROMPT.contains("{context}"));
}

#[test]
fn test_prompt_describes_record_schema() {
    for key in [
        "completion",
        "missingComponents",
        "recommendedTasks",
        "timelineEstimate",
        "progressByDiscipline",
        "activityHeatmap",
        "securityConcerns",
        "performanceIssues",
    ] {
        assert!(PROJECT_ANALYSIS_PROMPT.contains(key), "missing {key}");
    }
}

#[test]
fn test_build_analysis_prompt_fills_in_values() {
    let prompt = PromptBuilder::build_analysis_prompt("storefront", "Project manifest:\nsrc/");

    assert!(prompt.contains(r#""projectName": "storefront""#));
    assert!(prompt.ends_with("Context to analyze:\nProject manifest:\nsrc/"));
    assert!(!prompt.contains("{project_name}"));
    assert!(!prompt.contains("{context}"));
}

#[test]
fn test_context_placeholders_are_not_expanded() {
    let prompt = PromptBuilder::build_analysis_prompt("demo", "const t = `{project_name}`;");
    assert!(prompt.contains("const t = `{project_name}`;"));
}

#[test]
fn test_quotes_in_name_do_not_break_schema() {
    let prompt = PromptBuilder::build_analysis_prompt(r#"my "app""#, "ctx");
    assert!(prompt.contains(r#""projectName": "my 'app'""#));
}

#[test]
fn test_placeholders_in_name_are_not_expanded() {
    let prompt = PromptBuilder::build_analysis_prompt("x{context}y", "CTX");

    assert!(prompt.contains(r#""projectName": "x{context}y""#));
    assert_eq!(prompt.matches("CTX").count(), 1);
    assert!(prompt.ends_with("Context to analyze:\nCTX"));
}

#[test]
fn test_schema_braces_survive() {
    let prompt = PromptBuilder::build_analysis_prompt("demo", "ctx");
    assert!(prompt.contains(r#"{"date":"YYYY-MM-DD""#));
    assert_eq!(
        prompt.matches('{').count(),
        PROJECT_ANALYSIS_PROMPT.matches('{').count() - 2
    );
}
