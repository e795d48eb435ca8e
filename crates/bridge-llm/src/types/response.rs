use serde::{Deserialize, Serialize};

use super::message::ToolCall;

/// Token usage statistics
///
/// `total_tokens` is whatever the upstream reports; it is never recomputed
/// from the other two fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens generated in the completion
    pub completion_tokens: u32,
    /// Total tokens as reported upstream
    pub total_tokens: u32,
}

impl Usage {
    pub const fn new(prompt_tokens: u32, completion_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }
}

/// Canonical result of a chat completion, streamed or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Answer text, possibly empty
    pub content: String,
    /// Reasoning text from reasoning models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    /// Model that produced the answer
    pub model: String,
    /// Token usage
    pub usage: Usage,
    /// Why generation stopped, e.g. `stop`, `length`, `tool_calls`
    pub finish_reason: String,
    /// Requested tool calls, ordered by index; never an empty list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}
