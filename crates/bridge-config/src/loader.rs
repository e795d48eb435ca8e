use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::env::{expand_env, parse_flag, parse_var};
use crate::error::{ConfigError, ConfigIssue};
use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, the TOML does not match the schema, or validation fails
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&expand_env(&raw)?)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "configuration loaded from file");

        Ok(config)
    }

    /// Build configuration from environment variables alone
    ///
    /// Recognised variables: `DEEPSEEK_API_KEY`, `DEEPSEEK_BASE_URL`,
    /// `DEEPSEEK_DEFAULT_MODEL`, `DEEPSEEK_REQUEST_TIMEOUT` (milliseconds),
    /// `DEEPSEEK_MAX_RETRIES`, `DEEPSEEK_MAX_MESSAGE_LENGTH`,
    /// `SKIP_CONNECTION_TEST` and `SHOW_COST_INFO`. Anything unset keeps its
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` listing every unparseable variable and
    /// every validation failure
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut issues = Vec::new();
        let mut config = Self::default();

        if let Some(key) = parse_var("DEEPSEEK_API_KEY", &mut issues, |s| Ok(SecretString::from(s))) {
            config.deepseek.api_key = key;
        }
        if let Some(url) = parse_var("DEEPSEEK_BASE_URL", &mut issues, |s| Url::parse(s).map_err(|e| e.to_string())) {
            config.deepseek.base_url = url;
        }
        if let Some(model) = parse_var("DEEPSEEK_DEFAULT_MODEL", &mut issues, |s| Ok(s.to_owned())) {
            config.deepseek.default_model = model;
        }
        if let Some(ms) = parse_var("DEEPSEEK_REQUEST_TIMEOUT", &mut issues, parse_number::<u64>) {
            config.deepseek.request_timeout = Duration::from_millis(ms);
        }
        if let Some(retries) = parse_var("DEEPSEEK_MAX_RETRIES", &mut issues, parse_number::<u32>) {
            config.deepseek.max_retries = retries;
        }
        if let Some(length) = parse_var("DEEPSEEK_MAX_MESSAGE_LENGTH", &mut issues, parse_number::<usize>) {
            config.tools.max_message_length = length;
        }
        if let Some(skip) = parse_var("SKIP_CONNECTION_TEST", &mut issues, parse_flag) {
            config.startup.skip_connection_test = skip;
        }
        if let Some(show) = parse_var("SHOW_COST_INFO", &mut issues, parse_flag) {
            config.tools.show_cost_info = show;
        }

        issues.extend(config.issues());

        if issues.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Invalid { issues })
        }
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` with every problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let issues = self.issues();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { issues })
        }
    }

    fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let deepseek = &self.deepseek;

        if deepseek.api_key.expose_secret().trim().is_empty() {
            issues.push(ConfigIssue::new("deepseek.api_key", "API key is required"));
        }

        if !matches!(deepseek.base_url.scheme(), "http" | "https") {
            issues.push(ConfigIssue::new(
                "deepseek.base_url",
                format!("unsupported URL scheme `{}`", deepseek.base_url.scheme()),
            ));
        }

        if deepseek.default_model.trim().is_empty() {
            issues.push(ConfigIssue::new("deepseek.default_model", "must not be empty"));
        }

        if deepseek.request_timeout.is_zero() {
            issues.push(ConfigIssue::new("deepseek.request_timeout", "must be greater than zero"));
        }

        if self.tools.max_message_length == 0 {
            issues.push(ConfigIssue::new("tools.max_message_length", "must be greater than zero"));
        }

        issues
    }
}

fn parse_number<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| format!("expected a number, got `{raw}`: {e}"))
}
