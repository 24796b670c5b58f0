//! Guess a tech stack from an upload's file name

/// Infer a coarse tech stack from the uploaded file name.
///
/// The first entry doubles as the detected language. Rules are checked in
/// order and the first match wins.
pub fn detect_stack_from_name(file_name: &str) -> Vec<String> {
    let lowercase = file_name.to_lowercase();

    let stack: &[&str] = if lowercase.contains("react")
        || lowercase.ends_with(".jsx")
        || lowercase.ends_with(".tsx")
    {
        &["React", "JavaScript"]
    } else if lowercase.contains("next") {
        &["Next.js", "TypeScript"]
    } else if lowercase.contains("py") {
        &["Python", "FastAPI"]
    } else if lowercase.contains("api") || lowercase.ends_with(".ts") {
        &["TypeScript", "Node.js"]
    } else {
        &["Unknown"]
    };

    stack.iter().map(|s| s.to_string()).collect()
}
