//! The `chat_completion` tool exposed to protocol clients
//!
//! Validates caller input, runs it through [`DeepSeekClient`] and renders the
//! result as text. Failures are returned as error output rather than
//! propagated, so the calling agent sees them in the conversation.

mod input;
mod render;

use bridge_config::ToolsConfig;

pub use self::input::{ChatCompletionInput, MAX_COMPLETION_TOKENS, MAX_TOOLS};
pub use self::render::render_response;
use crate::client::DeepSeekClient;
use crate::error::{LlmError, ValidationError};

/// Name the tool is published under
pub const TOOL_NAME: &str = "chat_completion";

/// Description published with the tool
pub const TOOL_DESCRIPTION: &str = "Generate a chat completion with a DeepSeek model. Supports streaming, \
                                    reasoning models and function calling.";

/// Text result of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Rendered answer, or the error message
    pub text: String,
    /// Whether the invocation failed
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Error output, marked with an `Error: ` prefix
    pub fn error(err: &LlmError) -> Self {
        Self {
            text: format!("Error: {err}"),
            is_error: true,
        }
    }
}

/// The `chat_completion` tool
#[derive(Clone)]
pub struct ChatCompletionTool {
    client: DeepSeekClient,
    settings: ToolsConfig,
}

impl ChatCompletionTool {
    pub fn new(client: DeepSeekClient, settings: ToolsConfig) -> Self {
        Self { client, settings }
    }

    /// JSON Schema of [`ChatCompletionInput`]
    pub fn input_schema() -> serde_json::Value {
        schemars::schema_for!(ChatCompletionInput).to_value()
    }

    /// Run one invocation from raw JSON arguments
    pub async fn call_json(&self, arguments: serde_json::Value) -> ToolOutput {
        match serde_json::from_value::<ChatCompletionInput>(arguments) {
            Ok(input) => self.call(input).await,
            Err(e) => {
                let err = LlmError::from(ValidationError::new(format!("invalid arguments: {e}")));
                tracing::warn!(error = %err, tool = TOOL_NAME, "tool call rejected");
                ToolOutput::error(&err)
            }
        }
    }

    /// Run one invocation
    pub async fn call(&self, input: ChatCompletionInput) -> ToolOutput {
        match self.run(input).await {
            Ok(text) => ToolOutput::text(text),
            Err(e) => {
                tracing::warn!(error = %e, tool = TOOL_NAME, "tool call failed");
                ToolOutput::error(&e)
            }
        }
    }

    async fn run(&self, input: ChatCompletionInput) -> Result<String, LlmError> {
        input.validate(self.settings.max_message_length)?;

        let stream = input.stream;
        let params = input.into_params(self.client.default_model());

        let response = if stream {
            self.client.create_streaming_chat_completion(&params).await?
        } else {
            self.client.create_chat_completion(&params).await?
        };

        Ok(render_response(&response, self.settings.show_cost_info))
    }
}
