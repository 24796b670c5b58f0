//! Prompt templates for project analysis

/// Analyst prompt. The model is asked for a single JSON object shaped like an
/// analysis record; `{project_name}` and `{context}` are filled in by
/// [`PromptBuilder::build_analysis_prompt`].
pub const PROJECT_ANALYSIS_PROMPT: &str = r#"You are Krimson Project Tracker, a senior AI systems analyst.
You will receive snippets of a repository (structure manifest plus highlighted files). Infer the tech stack, completeness, missing deliverables, risks, blockers, and execution plan.

ONLY respond with minified JSON that EXACTLY follows this schema (no backticks, no prose):
{
  "projectName": "{project_name}",
  "completion": 0-100,
  "summary": "string",
  "missingComponents": ["string"],
  "recommendedTasks": [
    {"title":"string","status":"todo|in-progress|blocked|done","priority":"high|medium|low","detail":"string"}
  ],
  "risks": ["string"],
  "timelineEstimate": "string",
  "techStack": ["string"],
  "progressByDiscipline": {
    "frontend": 0-100,
    "backend": 0-100,
    "testing": 0-100,
    "documentation": 0-100,
    "ops": 0-100
  },
  "insights": {
    "totalFiles": number,
    "todoCount": number,
    "documentation": "incomplete|partial|complete",
    "detectedLanguage": "string"
  },
  "activityHeatmap": [
    {"date":"YYYY-MM-DD","focus":"Frontend|Backend|Testing|Documentation|Ops","value":0-100,"risk":true|false}
  ],
  "securityConcerns": ["string"],
  "performanceIssues": ["string"]
}

Context to analyze:
{context}"#;

pub struct PromptBuilder;

impl PromptBuilder {
    /// Fill the analyst prompt.
    ///
    /// Placeholders are resolved in a single pass over the template, so
    /// placeholder-looking text in the name or the uploaded files is left alone.
    pub fn build_analysis_prompt(project_name: &str, context: &str) -> String {
        let project_name = project_name.replace('"', "'");
        let mut prompt = String::with_capacity(PROJECT_ANALYSIS_PROMPT.len() + context.len());
        let mut rest = PROJECT_ANALYSIS_PROMPT;

        while let Some(start) = rest.find('{') {
            prompt.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{project_name}") {
                prompt.push_str(&project_name);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{context}") {
                prompt.push_str(context);
                rest = after;
            } else {
                prompt.push('{');
                rest = &tail[1..];
            }
        }

        prompt.push_str(rest);
        prompt
    }
}
