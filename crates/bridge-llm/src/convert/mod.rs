//! Conversion between canonical types and the `DeepSeek` wire format
//!
//! Outbound, [`build_request`] normalizes canonical parameters into an
//! upstream request. Inbound, [`reduce_response`] and the [`StreamEvent`]
//! conversion narrow upstream payloads into canonical types.
//!
//! [`StreamEvent`]: crate::types::StreamEvent

mod request;
mod response;
mod stream;

pub use request::{DEFAULT_TEMPERATURE, build_request};
pub use response::{NO_RESPONSE_MESSAGE, reduce_response};
