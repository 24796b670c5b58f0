//! Configuration validation module

use crate::config::{ActivityConfig, AnalysisConfig, HistoryConfig, LlmConfig, ServerConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("LLM configuration error: {message}")]
    Llm { message: String },

    #[error("Analysis configuration error: {message}")]
    Analysis { message: String },

    #[error("Retention configuration error: {message}")]
    Retention { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis {
            message: message.into(),
        }
    }

    pub fn retention(message: impl Into<String>) -> Self {
        Self::Retention {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // u16 cannot exceed 65535, so only 0 is out of range
        if self.port == 0 {
            return Err(ValidationError::server(format!(
                "Port must be in range 1-65535, got {}",
                self.port
            )));
        }

        if self.host.is_empty() {
            return Err(ValidationError::server("Host cannot be empty"));
        }

        if self.request_timeout_seconds == 0 || self.analysis_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "Request timeouts must be greater than 0",
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(ValidationError::server(
                "Maximum upload size must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.provider != "google_ai" {
            return Err(ValidationError::llm(format!(
                "Unsupported provider '{}', expected 'google_ai'",
                self.provider
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError::llm("LLM timeout must be > 0"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::llm(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.default_model.trim().is_empty() {
            return Err(ValidationError::llm("Default model cannot be empty"));
        }

        Ok(())
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.sample_snippet_bytes == 0 || self.preview_bytes == 0 {
            return Err(ValidationError::analysis(
                "Snippet and preview sizes must be greater than 0",
            ));
        }

        if self.sample_file_max_bytes == 0 {
            return Err(ValidationError::analysis(
                "Sample file size ceiling must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for HistoryConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_records_per_project == 0 {
            return Err(ValidationError::retention(
                "History must retain at least one record per project",
            ));
        }
        Ok(())
    }
}

impl Validate for ActivityConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_entries == 0 {
            return Err(ValidationError::retention(
                "Activity log must retain at least one entry",
            ));
        }
        Ok(())
    }
}
