//! `DeepSeek` chat completion client

use std::sync::Arc;

use bridge_config::DeepSeekConfig;
use futures_util::StreamExt;

use crate::convert::{build_request, reduce_response};
use crate::error::{ApiError, LlmError};
use crate::stream::accumulate;
use crate::transport::{ChatTransport, HttpTransport};
use crate::types::{ChatCompletionParams, ChatCompletionResponse, Message, StreamEvent};

const CREATE_CONTEXT: &str = "Failed to create chat completion";
const CREATE_STREAM_CONTEXT: &str = "Failed to create streaming chat completion";
const READ_STREAM_CONTEXT: &str = "Failed to read streaming chat completion";

const PROBE_PROMPT: &str = "Hello";
const PROBE_MAX_TOKENS: u32 = 10;

/// Client for the upstream chat completion API
///
/// Holds no per-call state; concurrent calls share only the transport.
#[derive(Clone)]
pub struct DeepSeekClient {
    transport: Arc<dyn ChatTransport>,
    default_model: String,
}

impl DeepSeekClient {
    /// Create a client talking HTTP to the configured endpoint
    pub fn new(config: &DeepSeekConfig) -> Result<Self, LlmError> {
        let transport =
            HttpTransport::new(config).map_err(|e| ApiError::from_transport("Failed to build HTTP client", e))?;

        Ok(Self::with_transport(Arc::new(transport), config.default_model.clone()))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn ChatTransport>, default_model: impl Into<String>) -> Self {
        Self {
            transport,
            default_model: default_model.into(),
        }
    }

    /// Model used by the liveness probe and by callers that name none
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Run a non-streaming chat completion
    pub async fn create_chat_completion(
        &self,
        params: &ChatCompletionParams,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let request = build_request(params, false);
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = params.tool_count(),
            stream = false,
            "creating chat completion"
        );

        let raw = self
            .transport
            .send(&request)
            .await
            .map_err(|e| failed(ApiError::from_transport(CREATE_CONTEXT, e)))?;

        let response = reduce_response(raw, &params.model).map_err(|e| failed(e.context(CREATE_CONTEXT)))?;
        log_finished(&response);

        Ok(response)
    }

    /// Run a streaming chat completion and fold the stream into one result
    ///
    /// Nothing is returned for a stream that fails part-way.
    pub async fn create_streaming_chat_completion(
        &self,
        params: &ChatCompletionParams,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let request = build_request(params, true);
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = params.tool_count(),
            stream = true,
            "creating chat completion"
        );

        let chunks = self
            .transport
            .send_stream(&request)
            .await
            .map_err(|e| failed(ApiError::from_transport(CREATE_STREAM_CONTEXT, e)))?;

        let events = chunks.map(|chunk| chunk.map(StreamEvent::from));
        let response = accumulate(events, &params.model)
            .await
            .map_err(|e| failed(ApiError::from_transport(READ_STREAM_CONTEXT, e)))?;
        log_finished(&response);

        Ok(response)
    }

    /// Cheap liveness probe against the default model
    ///
    /// True only if the upstream answered with some content. Never fails;
    /// errors are logged and reported as `false`.
    pub async fn test_connection(&self) -> bool {
        let params = ChatCompletionParams {
            max_tokens: Some(PROBE_MAX_TOKENS),
            ..ChatCompletionParams::new(&self.default_model, vec![Message::user(PROBE_PROMPT)])
        };

        match self.create_chat_completion(&params).await {
            Ok(response) if !response.content.is_empty() => {
                tracing::info!(model = %response.model, "connection test succeeded");
                true
            }
            Ok(response) => {
                tracing::warn!(model = %response.model, "connection test returned no content");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "connection test failed");
                false
            }
        }
    }
}

fn failed(err: ApiError) -> ApiError {
    tracing::warn!(error = %err, status = ?err.status(), retryable = err.is_retryable(), "chat completion failed");
    err
}

fn log_finished(response: &ChatCompletionResponse) {
    tracing::debug!(
        model = %response.model,
        finish_reason = %response.finish_reason,
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        total_tokens = response.usage.total_tokens,
        tool_calls = response.tool_calls.as_ref().map_or(0, Vec::len),
        "chat completion finished"
    );
}
