//! Krimson LLM - model access for project analysis
//!
//! Wraps a hosted LLM behind the [`LlmProvider`] trait and turns its free-form
//! replies into [`krimson_core::domain::analysis::RawAnalysisPayload`] values.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::AnalyzeProjectUseCase;
pub use domain::*;
pub use infrastructure::prompts;
pub use infrastructure::providers::GoogleAIProvider;
pub use infrastructure::response_parser::ResponseParser;
