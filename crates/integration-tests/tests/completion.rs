mod harness;

use bridge_llm::types::{FunctionDefinition, ToolChoice, ToolDefinition};
use bridge_llm::{ChatCompletionParams, Message, ToolCall, Usage};
use harness::config::{ConfigBuilder, TEST_API_KEY, client};
use harness::mock_upstream::{MockReply, MockUpstream};
use serde_json::json;

fn hello() -> ChatCompletionParams {
    ChatCompletionParams::new("deepseek-chat", vec![Message::user("Hello")])
}

#[tokio::test]
async fn chat_completion_returns_response() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url()).build();

    let response = client(&config).create_chat_completion(&hello()).await.unwrap();

    assert_eq!(response.content, "Hello from mock DeepSeek");
    assert_eq!(response.model, "deepseek-chat");
    assert_eq!(response.finish_reason, "stop");
    assert_eq!(response.usage, Usage::new(10, 5, 15));
    assert_eq!(response.tool_calls, None);
    assert_eq!(response.reasoning_content, None);
}

#[tokio::test]
async fn request_matches_wire_contract() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url()).build();

    client(&config).create_chat_completion(&hello()).await.unwrap();

    assert_eq!(
        mock.last_request(),
        json!({
            "model": "deepseek-chat",
            "messages": [{"role": "user", "content": "Hello"}],
            "temperature": 1.0,
            "stream": false
        })
    );
    assert_eq!(mock.last_authorization(), Some(format!("Bearer {TEST_API_KEY}")));
}

#[tokio::test]
async fn tools_and_choice_are_forwarded() {
    let mock = MockUpstream::start_with(MockReply::ToolCalls).await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url()).build();

    let params = ChatCompletionParams {
        tools: Some(vec![ToolDefinition::function(FunctionDefinition {
            description: Some("Current weather".to_owned()),
            parameters: Some(json!({"type": "object", "properties": {"location": {"type": "string"}}})),
            ..FunctionDefinition::new("get_weather")
        })]),
        tool_choice: Some(ToolChoice::function("get_weather")),
        ..hello()
    };

    let response = client(&config).create_chat_completion(&params).await.unwrap();

    let request = mock.last_request();
    assert_eq!(request["tools"][0]["type"], "function");
    assert_eq!(request["tools"][0]["function"]["name"], "get_weather");
    assert_eq!(
        request["tool_choice"],
        json!({"type": "function", "function": {"name": "get_weather"}})
    );

    assert_eq!(response.content, "");
    assert_eq!(response.finish_reason, "tool_calls");
    assert_eq!(
        response.tool_calls,
        Some(vec![
            ToolCall::function("call_weather", "get_weather", "{\"location\":\"NYC\"}"),
            ToolCall::function("call_time", "get_time", "{}"),
        ])
    );
}

#[tokio::test]
async fn empty_tool_list_is_omitted() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url()).build();

    let params = ChatCompletionParams {
        tools: Some(Vec::new()),
        ..hello()
    };
    client(&config).create_chat_completion(&params).await.unwrap();

    assert!(mock.last_request().get("tools").is_none());
}

#[tokio::test]
async fn reasoning_content_is_returned() {
    let mock = MockUpstream::start_with(MockReply::Reasoning {
        reasoning: "Two plus two".to_owned(),
        content: "4".to_owned(),
    })
    .await
    .unwrap();
    let config = ConfigBuilder::new(&mock.base_url()).build();

    let params = ChatCompletionParams::new("deepseek-reasoner", vec![Message::user("2+2?")]);
    let response = client(&config).create_chat_completion(&params).await.unwrap();

    assert_eq!(response.model, "deepseek-reasoner");
    assert_eq!(response.content, "4");
    assert_eq!(response.reasoning_content.as_deref(), Some("Two plus two"));
}

#[tokio::test]
async fn no_choices_is_an_error() {
    let mock = MockUpstream::start_with(MockReply::NoChoices).await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url()).build();

    let err = client(&config).create_chat_completion(&hello()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to create chat completion: No response from DeepSeek API"
    );
    assert!(!err.is_retryable());
}
