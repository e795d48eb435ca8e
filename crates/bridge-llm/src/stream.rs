//! Folding a streamed completion into a single result

use std::collections::BTreeMap;

use futures_util::{Stream, StreamExt};

use crate::types::{ChatCompletionResponse, StreamEvent, ToolCall, ToolCallFragment, Usage};

/// Accumulates stream events into a [`ChatCompletionResponse`]
///
/// Tool call fragments are merged per index: the id is taken from the first
/// fragment seen for that index and never replaced, name and arguments
/// fragments are appended in arrival order. Tool calls
/// come out ordered by index no matter which index streamed first.
#[derive(Debug)]
pub struct StreamAccumulator {
    model: String,
    content: String,
    reasoning: String,
    tool_calls: BTreeMap<u32, ToolCall>,
    finish_reason: Option<String>,
    usage: Option<Usage>,
}

impl StreamAccumulator {
    /// Start an empty accumulator; `requested_model` is reported unless a
    /// chunk names the model
    pub fn new(requested_model: impl Into<String>) -> Self {
        Self {
            model: requested_model.into(),
            content: String::new(),
            reasoning: String::new(),
            tool_calls: BTreeMap::new(),
            finish_reason: None,
            usage: None,
        }
    }

    /// Fold one event into the running state
    pub fn push(&mut self, event: StreamEvent) {
        if let Some(model) = event.model {
            self.model = model;
        }

        // Usage normally only arrives on the last chunk
        if let Some(usage) = event.usage {
            self.usage = Some(usage);
        }

        let Some(delta) = event.delta else {
            return;
        };

        if let Some(content) = delta.content {
            self.content.push_str(&content);
        }

        if let Some(reasoning) = delta.reasoning_content {
            self.reasoning.push_str(&reasoning);
        }

        for fragment in delta.tool_calls {
            self.merge_tool_call(fragment);
        }

        if let Some(reason) = delta.finish_reason.filter(|reason| !reason.is_empty()) {
            self.finish_reason = Some(reason);
        }
    }

    fn merge_tool_call(&mut self, fragment: ToolCallFragment) {
        let ToolCallFragment {
            index,
            id,
            name,
            arguments,
        } = fragment;

        let call = self
            .tool_calls
            .entry(index)
            .or_insert_with(|| ToolCall::function(id.unwrap_or_default(), "", ""));

        if let Some(name) = name {
            call.function.name.push_str(&name);
        }

        if let Some(arguments) = arguments {
            call.function.arguments.push_str(&arguments);
        }
    }

    /// Produce the final result
    pub fn finish(self) -> ChatCompletionResponse {
        let tool_calls = (!self.tool_calls.is_empty()).then(|| self.tool_calls.into_values().collect());

        ChatCompletionResponse {
            content: self.content,
            reasoning_content: (!self.reasoning.is_empty()).then_some(self.reasoning),
            model: self.model,
            usage: self.usage.unwrap_or_default(),
            finish_reason: self.finish_reason.unwrap_or_else(|| "stop".to_owned()),
            tool_calls,
        }
    }
}

/// Drain a stream of events into one result
///
/// Stops at the first error and returns it; whatever was accumulated up to
/// that point is dropped.
pub async fn accumulate<S, E>(events: S, requested_model: &str) -> Result<ChatCompletionResponse, E>
where
    S: Stream<Item = Result<StreamEvent, E>>,
{
    let mut events = std::pin::pin!(events);
    let mut accumulator = StreamAccumulator::new(requested_model);

    while let Some(event) = events.next().await {
        accumulator.push(event?);
    }

    Ok(accumulator.finish())
}
