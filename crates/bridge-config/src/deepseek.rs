use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use url::Url;

/// Default upstream API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Model used when a request does not name one
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of transport-level retries
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Upstream chat-completion API settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeepSeekConfig {
    /// API key sent as a bearer token
    #[serde(default = "empty_secret")]
    pub api_key: SecretString,
    /// Base endpoint; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Model used when the caller does not pick one
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Request timeout (e.g. "60s", "1500ms")
    #[serde(default = "default_request_timeout", deserialize_with = "deserialize_duration")]
    pub request_timeout: Duration,
    /// Maximum retries for transient transport failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_key: empty_secret(),
            base_url: default_base_url(),
            default_model: default_model(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::from("")
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

fn default_model() -> String {
    DEFAULT_MODEL.to_owned()
}

const fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

const fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
