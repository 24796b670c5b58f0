//! LLM-specific error types
//!
//! Every variant is recoverable from the tracker's point of view: callers
//! fall back to a locally generated analysis instead of failing the request.

use std::fmt;

/// LLM operation error
#[derive(Debug, Clone)]
pub enum LlmError {
    /// Authentication failed (invalid or missing API key)
    Authentication(String),

    /// Rate limited by the provider
    RateLimited {
        /// Seconds to wait before retrying (if provided)
        retry_after: Option<u64>,
        message: String,
    },

    /// Content was blocked by the provider's safety systems
    ContentFiltered { reason: String },

    /// Network/connection error
    Network(String),

    /// Request timed out
    Timeout { seconds: u64 },

    /// Service temporarily unavailable
    ServiceUnavailable(String),

    /// Provider returned an unexpected response, or one without usable JSON
    InvalidResponse(String),

    /// Configuration error
    Configuration(String),
}

impl LlmError {
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            retry_after: None,
            message: message.into(),
        }
    }

    pub fn rate_limited_with_retry(message: impl Into<String>, seconds: u64) -> Self {
        Self::RateLimited {
            retry_after: Some(seconds),
            message: message.into(),
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Short machine-readable label, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Authentication(_) => "authentication",
            LlmError::RateLimited { .. } => "rate_limited",
            LlmError::ContentFiltered { .. } => "content_filtered",
            LlmError::Network(_) => "network",
            LlmError::Timeout { .. } => "timeout",
            LlmError::ServiceUnavailable(_) => "service_unavailable",
            LlmError::InvalidResponse(_) => "invalid_response",
            LlmError::Configuration(_) => "configuration",
        }
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            LlmError::RateLimited {
                message,
                retry_after,
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited: {} (retry after {}s)", message, secs)
                } else {
                    write!(f, "Rate limited: {}", message)
                }
            }
            LlmError::ContentFiltered { reason } => write!(f, "Content filtered: {}", reason),
            LlmError::Network(msg) => write!(f, "Network error: {}", msg),
            LlmError::Timeout { seconds } => write!(f, "Request timed out after {}s", seconds),
            LlmError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            LlmError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            LlmError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        // URLs stay out of error text, which ends up in logs
        let err = err.without_url();
        if err.is_timeout() {
            LlmError::network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            LlmError::network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            LlmError::InvalidResponse(format!("Malformed response body: {}", err))
        } else {
            LlmError::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(format!("JSON parse error: {}", err))
    }
}
