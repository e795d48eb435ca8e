use serde::Deserialize;

/// Startup behaviour
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartupConfig {
    /// Skip the liveness probe against the upstream API
    #[serde(default)]
    pub skip_connection_test: bool,
}
