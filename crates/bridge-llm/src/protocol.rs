//! `DeepSeek` chat completion API wire format types
//!
//! These mirror the upstream JSON exactly and are wider than the canonical
//! types in [`crate::types`]; [`crate::convert`] narrows them at the boundary.

use serde::{Deserialize, Serialize};

use crate::types::{Message, Stop, ToolChoice, ToolDefinition};

// -- Request types --

/// `DeepSeek` chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepSeekRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<Message>,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Frequency penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    /// Presence penalty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Stop>,
    /// Whether to stream the response
    pub stream: bool,
    /// Tool definitions; never sent as an empty array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    /// Tool choice, only when the caller set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

// -- Response types --

/// `DeepSeek` chat completion response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekResponse {
    /// Response identifier
    #[serde(default)]
    pub id: String,
    /// Model used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<DeepSeekChoice>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<DeepSeekUsage>,
    /// Error reported in place of a completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DeepSeekErrorDetail>,
}

/// Choice within a `DeepSeek` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message
    #[serde(default)]
    pub message: DeepSeekChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message within a `DeepSeek` response choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekChoiceMessage {
    /// Text content; null when only tool calls were produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Reasoning text (`deepseek-reasoner` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    /// Tool calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<DeepSeekToolCall>>,
}

impl DeepSeekChoiceMessage {
    /// Reasoning text, if the model produced any
    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning_content.as_deref()
    }
}

/// Tool call within a `DeepSeek` response message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekToolCall {
    /// Tool call ID
    #[serde(default)]
    pub id: String,
    /// Tool type as sent upstream; not trusted
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,
    /// Function name and arguments
    #[serde(default)]
    pub function: DeepSeekFunctionCall,
}

/// Function call within a `DeepSeek` tool call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekFunctionCall {
    /// Function name
    #[serde(default)]
    pub name: String,
    /// JSON-encoded arguments
    #[serde(default)]
    pub arguments: String,
}

/// Token usage in a `DeepSeek` response
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeepSeekUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

// -- Streaming types --

/// `DeepSeek` streaming chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekChunk {
    /// Model used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Delta choices; may be empty, e.g. on a usage-only chunk
    #[serde(default)]
    pub choices: Vec<DeepSeekStreamChoice>,
    /// Usage (normally only on the final chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<DeepSeekUsage>,
    /// Error sent in-band on an already open stream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DeepSeekErrorDetail>,
}

/// Choice within a streaming chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekStreamChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Incremental delta
    #[serde(default)]
    pub delta: DeepSeekStreamDelta,
    /// Finish reason, null until the choice ends
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Delta content within a streaming choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekStreamDelta {
    /// Incremental text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Incremental reasoning text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    /// Incremental tool calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<DeepSeekStreamToolCall>>,
}

/// Tool call fragment within a streaming delta
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekStreamToolCall {
    /// Position within the final `tool_calls` array
    pub index: u32,
    /// Tool call ID (normally first fragment only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Partial function call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<DeepSeekStreamFunctionCall>,
}

/// Partial function call within a streaming tool call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeepSeekStreamFunctionCall {
    /// Function name fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Arguments fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

// -- Error response --

/// `DeepSeek` error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepSeekErrorResponse {
    /// Error details
    pub error: DeepSeekErrorDetail,
}

/// `DeepSeek` error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepSeekErrorDetail {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    /// Error code
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl DeepSeekErrorResponse {
    /// Extract the upstream's error message from a raw body, if it has one
    pub fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body).ok().map(|r| r.error.message)
    }
}
