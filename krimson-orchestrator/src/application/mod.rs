//! Orchestrator application layer

pub mod fallback;
pub mod use_cases;

pub use fallback::SyntheticAnalysisGenerator;
pub use use_cases::*;
