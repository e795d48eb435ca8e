//! Mock `DeepSeek` upstream for integration tests
//!
//! Serves `/v1/chat/completions` with canned JSON or SSE replies and records
//! what it was sent.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use futures_util::{StreamExt, stream};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Plain text answer; streamed one word per chunk
    Text(String),
    /// Reasoning followed by an answer
    Reasoning { reasoning: String, content: String },
    /// Two tool calls; streamed with the indexes interleaved, index 1 first
    ToolCalls,
    /// A response without any choices
    NoChoices,
    /// One good chunk, then a chunk that is not JSON
    BrokenStream,
    /// One good chunk, then an in-band error object
    StreamError,
    /// The default text, with a pause before every chunk
    SlowStream(Duration),
}

/// Mock upstream that returns predictable responses
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    reply: MockReply,
    request_count: AtomicU32,
    /// Number of requests to fail before succeeding
    fail_count: AtomicU32,
    fail_status: StatusCode,
    last_request: Mutex<Option<Value>>,
    last_authorization: Mutex<Option<String>>,
}

impl MockUpstream {
    /// Start a mock answering "Hello from mock DeepSeek"
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(MockReply::Text("Hello from mock DeepSeek".to_owned())).await
    }

    /// Start a mock with a specific reply
    pub async fn start_with(reply: MockReply) -> anyhow::Result<Self> {
        Self::start_inner(reply, 0, StatusCode::INTERNAL_SERVER_ERROR).await
    }

    /// Start a mock that fails the first `n` requests with `status`
    pub async fn start_failing(n: u32, status: StatusCode) -> anyhow::Result<Self> {
        Self::start_inner(MockReply::Text("recovered".to_owned()), n, status).await
    }

    async fn start_inner(reply: MockReply, fail_count: u32, fail_status: StatusCode) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            reply,
            request_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
            fail_status,
            last_request: Mutex::new(None),
            last_authorization: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL to configure the client with; the client appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of completion requests received, failed ones included
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Body of the most recent request
    pub fn last_request(&self) -> Value {
        self.state.last_request.lock().unwrap().clone().expect("no request received")
    }

    /// `Authorization` header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    *state.last_authorization.lock().unwrap() = authorization;
    *state.last_request.lock().unwrap() = Some(body.clone());

    // If fail_count > 0, decrement and fail
    if state.fail_count.load(Ordering::Relaxed) > 0 {
        state.fail_count.fetch_sub(1, Ordering::Relaxed);
        return (
            state.fail_status,
            Json(json!({
                "error": {
                    "message": "mock upstream intentional failure",
                    "type": "server_error"
                }
            })),
        )
            .into_response();
    }

    let model = body["model"].as_str().unwrap_or("deepseek-chat").to_owned();

    if body["stream"].as_bool().unwrap_or(false) {
        let delay = match state.reply {
            MockReply::SlowStream(delay) => Some(delay),
            _ => None,
        };
        return sse(stream_chunks(&state.reply, &model), delay);
    }

    Json(completion(&state.reply, &model)).into_response()
}

const SLOW_TEXT: &str = "Hello from mock DeepSeek";

fn usage() -> Value {
    json!({"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15})
}

fn completion(reply: &MockReply, model: &str) -> Value {
    let (message, finish_reason) = match reply {
        MockReply::Text(content) => (json!({"role": "assistant", "content": content}), "stop"),
        MockReply::BrokenStream | MockReply::StreamError => {
            (json!({"role": "assistant", "content": "partial"}), "stop")
        }
        MockReply::SlowStream(_) => (json!({"role": "assistant", "content": SLOW_TEXT}), "stop"),
        MockReply::Reasoning { reasoning, content } => (
            json!({"role": "assistant", "content": content, "reasoning_content": reasoning}),
            "stop",
        ),
        MockReply::ToolCalls => (
            json!({
                "role": "assistant",
                "content": null,
                "tool_calls": [
                    {
                        "id": "call_weather",
                        "type": "function",
                        "function": {"name": "get_weather", "arguments": "{\"location\":\"NYC\"}"}
                    },
                    {
                        "id": "call_time",
                        "type": "function",
                        "function": {"name": "get_time", "arguments": "{}"}
                    }
                ]
            }),
            "tool_calls",
        ),
        MockReply::NoChoices => {
            return json!({"id": "chatcmpl-mock", "model": model, "choices": [], "usage": usage()});
        }
    };

    json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{"index": 0, "message": message, "finish_reason": finish_reason}],
        "usage": usage()
    })
}

fn chunk(model: &str, delta: Value, finish_reason: Option<&str>) -> String {
    json!({
        "id": "chatcmpl-mock-stream",
        "object": "chat.completion.chunk",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{"index": 0, "delta": delta, "finish_reason": finish_reason}]
    })
    .to_string()
}

fn stream_chunks(reply: &MockReply, model: &str) -> Vec<String> {
    let mut chunks = vec![chunk(model, json!({"role": "assistant", "content": ""}), None)];

    match reply {
        MockReply::Text(content) => text_chunks(&mut chunks, model, content),
        MockReply::SlowStream(_) => text_chunks(&mut chunks, model, SLOW_TEXT),
        MockReply::Reasoning { reasoning, content } => {
            let (head, tail) = reasoning.split_at(reasoning.len() / 2);
            chunks.push(chunk(model, json!({"reasoning_content": head}), None));
            chunks.push(chunk(model, json!({"reasoning_content": tail}), None));
            chunks.push(chunk(model, json!({"content": content}), Some("stop")));
        }
        MockReply::ToolCalls => {
            let fragments = [
                tool_fragment(1, Some("call_time"), Some("get_time"), Some("")),
                tool_fragment(0, Some("call_weather"), Some("get_"), Some("")),
                tool_fragment(0, None, Some("weather"), Some("{\"loc")),
                tool_fragment(1, None, None, Some("{}")),
                tool_fragment(0, None, None, Some("ation\":\"NYC\"}")),
            ];
            chunks.extend(fragments.into_iter().map(|delta| chunk(model, delta, None)));
            chunks.push(chunk(model, json!({}), Some("tool_calls")));
        }
        MockReply::NoChoices => {}
        MockReply::BrokenStream => {
            chunks.push(chunk(model, json!({"content": "partial"}), None));
            chunks.push("{not json".to_owned());
        }
        MockReply::StreamError => {
            chunks.push(chunk(model, json!({"content": "partial"}), None));
            chunks.push(json!({"error": {"message": "Service overloaded", "type": "server_error"}}).to_string());
        }
    }

    // Usage arrives alone on the last chunk
    chunks.push(json!({"id": "chatcmpl-mock-stream", "model": model, "choices": [], "usage": usage()}).to_string());

    chunks
}

fn text_chunks(chunks: &mut Vec<String>, model: &str, content: &str) {
    let words: Vec<&str> = content.split(' ').collect();
    for (i, word) in words.iter().enumerate() {
        let piece = if i + 1 < words.len() { format!("{word} ") } else { (*word).to_owned() };
        chunks.push(chunk(model, json!({"content": piece}), None));
    }
    chunks.push(chunk(model, json!({}), Some("stop")));
}

fn tool_fragment(index: u32, id: Option<&str>, name: Option<&str>, arguments: Option<&str>) -> Value {
    let mut call = json!({"index": index, "function": {}});
    if let Some(id) = id {
        call["id"] = json!(id);
        call["type"] = json!("function");
    }
    if let Some(name) = name {
        call["function"]["name"] = json!(name);
    }
    if let Some(arguments) = arguments {
        call["function"]["arguments"] = json!(arguments);
    }
    json!({"tool_calls": [call]})
}

fn sse(chunks: Vec<String>, delay: Option<Duration>) -> Response {
    let mut events: Vec<String> = chunks.into_iter().map(|chunk| format!("data: {chunk}\n\n")).collect();
    // Keep-alive comments are sent between chunks upstream
    events.push(": keep-alive\n\n".to_owned());
    events.push("data: [DONE]\n\n".to_owned());

    let body = stream::iter(events).then(move |event| async move {
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok::<_, std::convert::Infallible>(event)
    });

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(body),
    )
        .into_response()
}
