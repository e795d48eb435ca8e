//! Programmatic configuration for integration tests

use std::sync::Arc;
use std::time::Duration;

use bridge_config::{Config, DeepSeekConfig, ToolsConfig};
use bridge_llm::{ChatCompletionTool, DeepSeekClient, HttpTransport};
use secrecy::SecretString;

/// API key the mock expects as a bearer token
pub const TEST_API_KEY: &str = "sk-test-key";

/// Builder for test configurations pointed at a mock upstream
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal configuration: no retries, short timeout
    pub fn new(base_url: &str) -> Self {
        Self {
            config: Config {
                deepseek: DeepSeekConfig {
                    api_key: SecretString::from(TEST_API_KEY),
                    base_url: base_url.parse().expect("valid URL"),
                    request_timeout: Duration::from_secs(5),
                    max_retries: 0,
                    ..DeepSeekConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Retry transient failures up to `n` times
    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.config.deepseek.max_retries = n;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.config.deepseek.request_timeout = timeout;
        self
    }

    /// Set the default model
    pub fn with_default_model(mut self, model: &str) -> Self {
        self.config.deepseek.default_model = model.to_owned();
        self
    }

    /// Set the tool settings
    pub fn with_tools(mut self, tools: ToolsConfig) -> Self {
        self.config.tools = tools;
        self
    }

    /// Build the final configuration, validating it as startup would
    pub fn build(self) -> Config {
        self.config.validate().expect("valid test configuration");
        self.config
    }
}

/// Client over HTTP with retry waits short enough for tests
pub fn client(config: &Config) -> DeepSeekClient {
    let transport = HttpTransport::new(&config.deepseek)
        .expect("HTTP client")
        .with_initial_backoff(Duration::from_millis(10));

    DeepSeekClient::with_transport(Arc::new(transport), config.deepseek.default_model.clone())
}

/// The `chat_completion` tool over [`client`]
pub fn tool(config: &Config) -> ChatCompletionTool {
    ChatCompletionTool::new(client(config), config.tools.clone())
}
