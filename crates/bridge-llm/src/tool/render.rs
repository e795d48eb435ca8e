use std::fmt::Write as _;

use crate::cost::{calculate_cost, format_cost};
use crate::types::ChatCompletionResponse;

/// Render a completion as the tool's text output
///
/// Reasoning comes first, then the answer, then any requested tool calls.
/// With `show_cost`, a usage footer closes the output.
pub fn render_response(response: &ChatCompletionResponse, show_cost: bool) -> String {
    let mut sections = Vec::new();

    if let Some(reasoning) = &response.reasoning_content {
        sections.push(format!("Reasoning:\n{reasoning}"));
    }

    if !response.content.is_empty() {
        sections.push(response.content.clone());
    }

    if let Some(calls) = &response.tool_calls {
        let mut list = String::from("Tool calls:");
        for call in calls {
            let _ = write!(list, "\n- {} (id: {}): {}", call.function.name, call.id, call.function.arguments);
        }
        sections.push(list);
    }

    if sections.is_empty() {
        sections.push("(empty response)".to_owned());
    }

    if show_cost {
        sections.push(usage_footer(response));
    }

    sections.join("\n\n")
}

fn usage_footer(response: &ChatCompletionResponse) -> String {
    let usage = response.usage;
    let cost = calculate_cost(usage.prompt_tokens, usage.completion_tokens, &response.model);

    format!(
        "---\nModel: {} | Finish: {}\nTokens: {} prompt + {} completion = {} total | Cost: {}",
        response.model,
        response.finish_reason,
        usage.prompt_tokens,
        usage.completion_tokens,
        usage.total_tokens,
        format_cost(cost),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ToolCall, Usage};

    fn response() -> ChatCompletionResponse {
        ChatCompletionResponse {
            content: "Hello!".to_owned(),
            reasoning_content: None,
            model: "deepseek-chat".to_owned(),
            usage: Usage::new(5, 2, 7),
            finish_reason: "stop".to_owned(),
            tool_calls: None,
        }
    }

    #[test]
    fn plain_answer_with_cost() {
        insta::assert_snapshot!(render_response(&response(), true), @r"
        Hello!

        ---
        Model: deepseek-chat | Finish: stop
        Tokens: 5 prompt + 2 completion = 7 total | Cost: $0.0000
        ");
    }

    #[test]
    fn plain_answer_without_cost() {
        assert_eq!(render_response(&response(), false), "Hello!");
    }

    #[test]
    fn reasoning_and_tool_calls() {
        let response = ChatCompletionResponse {
            content: String::new(),
            reasoning_content: Some("The user wants the weather.".to_owned()),
            model: "deepseek-reasoner".to_owned(),
            usage: Usage::new(1_000_000, 1_000_000, 2_000_000),
            finish_reason: "tool_calls".to_owned(),
            tool_calls: Some(vec![ToolCall::function(
                "call_123",
                "get_weather",
                r#"{"location":"NYC"}"#,
            )]),
        };

        insta::assert_snapshot!(render_response(&response, true), @r#"
        Reasoning:
        The user wants the weather.

        Tool calls:
        - get_weather (id: call_123): {"location":"NYC"}

        ---
        Model: deepseek-reasoner | Finish: tool_calls
        Tokens: 1000000 prompt + 1000000 completion = 2000000 total | Cost: $2.74
        "#);
    }

    #[test]
    fn empty_answer_is_marked() {
        let response = ChatCompletionResponse {
            content: String::new(),
            ..response()
        };

        assert_eq!(render_response(&response, false), "(empty response)");
    }
}
