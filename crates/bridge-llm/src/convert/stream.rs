use crate::protocol::{DeepSeekChunk, DeepSeekStreamChoice, DeepSeekStreamToolCall};
use crate::types::{StreamDelta, StreamEvent, ToolCallFragment, Usage};

impl From<DeepSeekChunk> for StreamEvent {
    // Only the first choice is followed; the client never asks for more than one
    fn from(chunk: DeepSeekChunk) -> Self {
        Self {
            model: chunk.model.filter(|model| !model.is_empty()),
            delta: chunk.choices.into_iter().next().map(StreamDelta::from),
            usage: chunk.usage.map(Usage::from),
        }
    }
}

impl From<DeepSeekStreamChoice> for StreamDelta {
    fn from(choice: DeepSeekStreamChoice) -> Self {
        Self {
            content: choice.delta.content,
            reasoning_content: choice.delta.reasoning_content,
            tool_calls: choice
                .delta
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(ToolCallFragment::from)
                .collect(),
            finish_reason: choice.finish_reason,
        }
    }
}

impl From<DeepSeekStreamToolCall> for ToolCallFragment {
    fn from(call: DeepSeekStreamToolCall) -> Self {
        let (name, arguments) = call.function.map_or((None, None), |f| (f.name, f.arguments));

        Self {
            index: call.index,
            id: call.id,
            name,
            arguments,
        }
    }
}
