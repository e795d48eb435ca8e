use crate::error::ApiError;
use crate::protocol::{DeepSeekResponse, DeepSeekToolCall, DeepSeekUsage};
use crate::types::{ChatCompletionResponse, ToolCall, Usage};

/// Error message when the upstream returns no choices
pub const NO_RESPONSE_MESSAGE: &str = "No response from DeepSeek API";

/// Reduce a non-streaming upstream response to the canonical result
///
/// Only the first choice is used. `requested_model` fills in for a missing
/// model name. An error body sent with a success status is reported with
/// the upstream's own message.
pub fn reduce_response(response: DeepSeekResponse, requested_model: &str) -> Result<ChatCompletionResponse, ApiError> {
    if let Some(error) = response.error {
        return Err(ApiError::new(error.message));
    }

    let Some(choice) = response.choices.into_iter().next() else {
        return Err(ApiError::new(NO_RESPONSE_MESSAGE));
    };

    let message = choice.message;
    let reasoning_content = message.reasoning().map(str::to_owned);

    let tool_calls = message
        .tool_calls
        .map(|calls| calls.into_iter().map(ToolCall::from).collect::<Vec<_>>())
        .filter(|calls| !calls.is_empty());

    Ok(ChatCompletionResponse {
        content: message.content.unwrap_or_default(),
        reasoning_content,
        model: response
            .model
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| requested_model.to_owned()),
        usage: response.usage.map(Usage::from).unwrap_or_default(),
        finish_reason: finish_reason_or_stop(choice.finish_reason),
        tool_calls,
    })
}

fn finish_reason_or_stop(reason: Option<String>) -> String {
    reason
        .filter(|reason| !reason.is_empty())
        .unwrap_or_else(|| "stop".to_owned())
}

impl From<DeepSeekUsage> for Usage {
    fn from(usage: DeepSeekUsage) -> Self {
        Self::new(usage.prompt_tokens, usage.completion_tokens, usage.total_tokens)
    }
}

impl From<DeepSeekToolCall> for ToolCall {
    // The upstream `type` is not trusted; every call is a function call
    fn from(call: DeepSeekToolCall) -> Self {
        Self::function(call.id, call.function.name, call.function.arguments)
    }
}
