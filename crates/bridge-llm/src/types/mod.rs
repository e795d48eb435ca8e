//! Canonical request and response types
//!
//! Wire payloads are converted into these immediately at the boundary (see
//! [`crate::protocol`] and [`crate::convert`]); nothing looser than these
//! types reaches the reducer or the stream accumulator.

pub mod message;
pub mod request;
pub mod response;
pub mod stream;
pub mod tool;

pub use message::{FunctionCall, Message, Role, ToolCall};
pub use request::{ChatCompletionParams, Stop};
pub use response::{ChatCompletionResponse, Usage};
pub use stream::{StreamDelta, StreamEvent, ToolCallFragment};
pub use tool::{
    FunctionDefinition, ToolChoice, ToolChoiceFunction, ToolChoiceFunctionName, ToolChoiceMode, ToolDefinition,
    ToolKind,
};
