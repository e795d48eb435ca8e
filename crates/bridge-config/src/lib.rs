#![allow(clippy::must_use_candidate)]

pub mod deepseek;
mod env;
pub mod error;
mod loader;
pub mod startup;
pub mod telemetry;
pub mod tools;

use serde::Deserialize;

pub use deepseek::*;
pub use error::{ConfigError, ConfigIssue};
pub use startup::*;
pub use telemetry::*;
pub use tools::*;

/// Top-level bridge configuration
///
/// Built once at process start and handed to the client by reference.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Upstream API connection settings
    #[serde(default)]
    pub deepseek: DeepSeekConfig,
    /// Chat completion tool settings
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Process startup behaviour
    #[serde(default)]
    pub startup: StartupConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
