use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::{FieldIssue, ValidationError};
use crate::types::{ChatCompletionParams, Message, Role, Stop, ToolChoice, ToolDefinition};

/// Most tool definitions accepted in one request
pub const MAX_TOOLS: usize = 128;

/// Largest accepted `max_tokens`
pub const MAX_COMPLETION_TOKENS: u32 = 32_768;

/// Arguments of the `chat_completion` tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ChatCompletionInput {
    /// Conversation to complete, oldest first
    pub messages: Vec<Message>,
    /// Model to use; the configured default when omitted
    #[serde(default)]
    pub model: Option<String>,
    /// Sampling temperature between 0 and 2
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate, 1 to 32768
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Nucleus sampling threshold between 0 and 1
    #[serde(default)]
    pub top_p: Option<f64>,
    /// Frequency penalty between -2 and 2
    #[serde(default)]
    pub frequency_penalty: Option<f64>,
    /// Presence penalty between -2 and 2
    #[serde(default)]
    pub presence_penalty: Option<f64>,
    /// Stop sequence or sequences
    #[serde(default)]
    pub stop: Option<Stop>,
    /// Stream the upstream response
    #[serde(default)]
    pub stream: bool,
    /// Functions the model may call
    #[serde(default)]
    pub tools: Option<Vec<ToolDefinition>>,
    /// `auto`, `none`, `required`, or a specific function
    #[serde(default)]
    pub tool_choice: Option<ToolChoice>,
}

impl ChatCompletionInput {
    /// Check the input against the limits the upstream enforces
    ///
    /// Every problem is reported, not just the first.
    pub fn validate(&self, max_message_length: usize) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.messages.is_empty() {
            issues.push(FieldIssue::new("messages", "at least one message is required"));
        }

        for (i, message) in self.messages.iter().enumerate() {
            if message.content.chars().count() > max_message_length {
                issues.push(FieldIssue::new(
                    format!("messages[{i}].content"),
                    format!("exceeds the maximum length of {max_message_length} characters"),
                ));
            }

            let has_call_id = message.tool_call_id.as_deref().is_some_and(|id| !id.trim().is_empty());
            if message.role == Role::Tool && !has_call_id {
                issues.push(FieldIssue::new(
                    format!("messages[{i}].tool_call_id"),
                    "is required for tool messages",
                ));
            }
        }

        check_range(&mut issues, "temperature", self.temperature, 0.0, 2.0);
        check_range(&mut issues, "top_p", self.top_p, 0.0, 1.0);
        check_range(&mut issues, "frequency_penalty", self.frequency_penalty, -2.0, 2.0);
        check_range(&mut issues, "presence_penalty", self.presence_penalty, -2.0, 2.0);

        if let Some(max_tokens) = self.max_tokens
            && !(1..=MAX_COMPLETION_TOKENS).contains(&max_tokens)
        {
            issues.push(FieldIssue::new(
                "max_tokens",
                format!("must be between 1 and {MAX_COMPLETION_TOKENS}"),
            ));
        }

        let tools = self.tools.as_deref().unwrap_or_default();

        if tools.len() > MAX_TOOLS {
            issues.push(FieldIssue::new("tools", format!("at most {MAX_TOOLS} tools are allowed")));
        }

        for (i, tool) in tools.iter().enumerate() {
            if tool.function.name.trim().is_empty() {
                issues.push(FieldIssue::new(format!("tools[{i}].function.name"), "must not be empty"));
            }
        }

        if let Some(name) = self.tool_choice.as_ref().and_then(ToolChoice::function_name)
            && !tools.iter().any(|tool| tool.function.name == name)
        {
            issues.push(FieldIssue::new(
                "tool_choice",
                format!("names function `{name}` which is not among the provided tools"),
            ));
        }

        if let Some(model) = &self.model
            && model.trim().is_empty()
        {
            issues.push(FieldIssue::new("model", "must not be empty"));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::from_issues(issues))
        }
    }

    /// Canonical parameters for the client, filling in the default model
    pub fn into_params(self, default_model: &str) -> ChatCompletionParams {
        ChatCompletionParams {
            model: self.model.unwrap_or_else(|| default_model.to_owned()),
            messages: self.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
            stop: self.stop,
            tools: self.tools,
            tool_choice: self.tool_choice,
        }
    }
}

fn check_range(issues: &mut Vec<FieldIssue>, field: &str, value: Option<f64>, min: f64, max: f64) {
    if let Some(value) = value
        && !(min..=max).contains(&value)
    {
        issues.push(FieldIssue::new(field, format!("must be between {min} and {max}")));
    }
}
