use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::message::Message;
use super::tool::{ToolChoice, ToolDefinition};

/// Stop sequence(s)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Stop {
    Single(String),
    Multiple(Vec<String>),
}

/// Canonical chat-completion request, built fresh for each call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatCompletionParams {
    /// Model identifier
    pub model: String,
    /// Conversation, oldest first
    pub messages: Vec<Message>,
    /// Sampling temperature; the upstream default of 1.0 is sent when unset
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Nucleus sampling parameter
    pub top_p: Option<f64>,
    /// Frequency penalty
    pub frequency_penalty: Option<f64>,
    /// Presence penalty
    pub presence_penalty: Option<f64>,
    /// Stop sequence(s)
    pub stop: Option<Stop>,
    /// Tools available to the model
    pub tools: Option<Vec<ToolDefinition>>,
    /// How the model should use the tools
    pub tool_choice: Option<ToolChoice>,
}

impl ChatCompletionParams {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            ..Self::default()
        }
    }

    /// Number of tool definitions attached
    pub fn tool_count(&self) -> usize {
        self.tools.as_ref().map_or(0, Vec::len)
    }
}
