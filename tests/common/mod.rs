//! Common test helpers for application-level tests

#![allow(dead_code)]

use axum_test::TestServer;
use krimson_tracker::{Config, create_app};

/// Test configuration builder for creating consistent test configurations
pub struct TestConfigBuilder {
    config: Config,
}

impl TestConfigBuilder {
    /// Defaults without any LLM credentials
    pub fn new() -> Self {
        let mut config = Config::default();
        config.llm.google_ai.api_key = None;
        Self { config }
    }

    /// Point the Gemini client at `base_url` with the given key
    pub fn with_gemini(mut self, base_url: &str, api_key: &str) -> Self {
        self.config.llm.google_ai.base_url = base_url.to_string();
        self.config.llm.google_ai.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_history_limit(mut self, max_records: usize) -> Self {
        self.config.history.max_records_per_project = max_records;
        self
    }

    pub fn without_docs(mut self) -> Self {
        self.config.server.enable_docs = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a test server for `config`
pub fn test_server(config: &Config) -> TestServer {
    let app = create_app(config).expect("application builds");
    TestServer::new(app).expect("test server starts")
}
