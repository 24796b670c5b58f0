//! Krimson Project Tracker - application library
//!
//! Wires the core stores, the LLM client and the orchestrator router together.

mod app;

pub use app::{AppError, create_app};
pub use krimson_core::{Config, init_tracing};
pub use krimson_orchestrator::presentation::controllers::OrchestratorState;

// Re-export for convenience
pub use krimson_core;
pub use krimson_llm;
pub use krimson_orchestrator;
