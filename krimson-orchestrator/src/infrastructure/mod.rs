//! Upload inspection

pub mod archive;
pub mod stack_detection;

pub use archive::{ContextStats, ProjectContext, ProjectContextBuilder, UploadedFile};
pub use stack_detection::detect_stack_from_name;
