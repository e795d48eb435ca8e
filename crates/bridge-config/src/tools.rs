use serde::Deserialize;

/// Default upper bound on a single message's length, in characters
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 100_000;

/// Settings for the `chat_completion` tool surface
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Longest accepted message content
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    /// Append token usage and cost to tool output
    #[serde(default = "default_show_cost_info")]
    pub show_cost_info: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
            show_cost_info: true,
        }
    }
}

const fn default_max_message_length() -> usize {
    DEFAULT_MAX_MESSAGE_LENGTH
}

const fn default_show_cost_info() -> bool {
    true
}
