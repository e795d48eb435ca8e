use crate::protocol::DeepSeekRequest;
use crate::types::ChatCompletionParams;

/// Temperature sent when the caller does not set one
pub const DEFAULT_TEMPERATURE: f64 = 1.0;

/// Build the upstream request for a call
///
/// `tools` is omitted when absent or empty, and `tool_choice` only when the
/// caller set one.
pub fn build_request(params: &ChatCompletionParams, streaming: bool) -> DeepSeekRequest {
    DeepSeekRequest {
        model: params.model.clone(),
        messages: params.messages.clone(),
        temperature: params.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        max_tokens: params.max_tokens,
        top_p: params.top_p,
        frequency_penalty: params.frequency_penalty,
        presence_penalty: params.presence_penalty,
        stop: params.stop.clone(),
        stream: streaming,
        tools: params.tools.clone().filter(|tools| !tools.is_empty()),
        tool_choice: params.tool_choice.clone(),
    }
}
