//! Chat completion bridge to the `DeepSeek` API
//!
//! Normalizes caller requests into the upstream wire format, reduces plain
//! and streamed responses into one canonical result, classifies failures and
//! prices token usage.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod client;
pub mod convert;
pub mod cost;
pub mod error;
pub mod protocol;
pub mod stream;
pub mod tool;
pub mod transport;
pub mod types;

pub use client::DeepSeekClient;
pub use cost::{calculate_cost, format_cost};
pub use error::{ApiError, ApiErrorKind, FieldIssue, LlmError, ValidationError};
pub use stream::StreamAccumulator;
pub use tool::{ChatCompletionInput, ChatCompletionTool, ToolOutput};
pub use transport::{ChatTransport, HttpTransport, TransportError};
pub use types::{ChatCompletionParams, ChatCompletionResponse, Message, Role, ToolCall, Usage};
