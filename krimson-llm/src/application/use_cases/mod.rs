pub mod analyze_project;

pub use analyze_project::AnalyzeProjectUseCase;
