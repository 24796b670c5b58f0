//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub analysis: AnalysisConfig,
    pub history: HistoryConfig,
    pub activity: ActivityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether to expose interactive API docs (Swagger UI).
    pub enable_docs: bool,
    /// Global request timeout in seconds applied at the HTTP layer.
    pub request_timeout_seconds: u64,
    /// Timeout for the upload/analysis endpoint. Must exceed the LLM timeout so the
    /// fallback record still has time to be produced.
    pub analysis_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any.
    pub allowed_origins: Vec<String>,
    /// Maximum accepted upload body size in bytes.
    pub max_upload_bytes: usize,
    /// Seconds to wait for in-flight requests after a shutdown signal.
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_docs: true,
            request_timeout_seconds: 30,
            analysis_timeout_seconds: 90,
            allowed_origins: vec!["*".to_string()],
            max_upload_bytes: 50 * 1024 * 1024,
            shutdown_timeout_seconds: 5,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// One of "json", "pretty" or "compact"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Active provider. Only "google_ai" is supported.
    pub provider: String,

    /// Google AI (Gemini) configuration
    pub google_ai: GoogleAIConfig,

    /// Model used for project analysis
    pub default_model: String,
    /// Temperature for generation (0.0 to 1.0)
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Upper bound for one analysis call in seconds. No retries are attempted.
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "google_ai".to_string(),
            google_ai: GoogleAIConfig::default(),
            default_model: "gemini-pro".to_string(),
            temperature: 0.3,
            max_tokens: 4096,
            timeout_seconds: 60,
        }
    }
}

impl LlmConfig {
    /// API key for the configured provider, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.google_ai
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Google AI (Gemini) provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleAIConfig {
    /// API Key (can also use GEMINI_API_KEY or GOOGLE_AI_KEY env vars)
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
}

impl Default for GoogleAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// Limits applied while inspecting an uploaded project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of archive entries listed in the manifest
    pub manifest_entry_limit: usize,
    /// Number of text files sampled from an archive
    pub sample_file_limit: usize,
    /// Archive entries at or above this size are never sampled
    pub sample_file_max_bytes: u64,
    /// Bytes taken from each sampled archive entry
    pub sample_snippet_bytes: usize,
    /// Bytes taken from a single uploaded text file
    pub preview_bytes: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            manifest_entry_limit: 80,
            sample_file_limit: 5,
            sample_file_max_bytes: 200 * 1024,
            sample_snippet_bytes: 800,
            preview_bytes: 16_000,
        }
    }
}

/// Analysis history retention
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_records_per_project: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_records_per_project: 8,
        }
    }
}

/// Operator activity log retention
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    pub max_entries: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self { max_entries: 200 }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.llm.validate()?;
        self.analysis.validate()?;
        self.history.validate()?;
        self.activity.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("KRIMSON").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.apply_conventional_env();

        config.validate()?;

        Ok(config)
    }

    /// Honour the conventional `PORT` and Gemini key variables used by hosting platforms.
    fn apply_conventional_env(&mut self) {
        if let Some(port) = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        if self.llm.api_key().is_none() {
            self.llm.google_ai.api_key = std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_AI_KEY"))
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
