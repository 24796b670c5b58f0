#[path = "../common/mod.rs"]
mod common;

mod test_analyze_project;
mod test_prompts;
