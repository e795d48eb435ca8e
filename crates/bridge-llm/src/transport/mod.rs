//! Upstream transport seam
//!
//! The client talks to the upstream only through [`ChatTransport`], so tests
//! can swap in an in-process fake for [`HttpTransport`].

mod http;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use thiserror::Error;

pub use self::http::HttpTransport;
use crate::error::ApiError;
use crate::protocol::{DeepSeekChunk, DeepSeekErrorResponse, DeepSeekRequest, DeepSeekResponse};

/// Stream of parsed upstream chunks, ending after the `[DONE]` sentinel
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<DeepSeekChunk, TransportError>> + Send>>;

/// Sends chat-completion requests to the upstream
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a non-streaming request
    async fn send(&self, request: &DeepSeekRequest) -> Result<DeepSeekResponse, TransportError>;

    /// Send a streaming request and return its chunks
    ///
    /// An error object sent on the open stream is yielded as
    /// [`TransportError::Upstream`], never as a chunk.
    async fn send_stream(&self, request: &DeepSeekRequest) -> Result<ChunkStream, TransportError>;
}

/// Failures below the protocol layer
#[derive(Debug, Error)]
pub enum TransportError {
    /// The upstream answered with a non-success status
    #[error("upstream returned status {status}: {}", error_detail(.body))]
    Status { status: u16, body: String },

    /// The request could not be sent or the body could not be read
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A payload did not match the wire format
    #[error("failed to parse upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The SSE framing was broken
    #[error("event stream error: {0}")]
    EventStream(String),

    /// The upstream reported an error inside an open stream
    #[error("upstream reported an error: {message}")]
    Upstream { message: String },
}

impl TransportError {
    /// Whether re-sending the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::Decode(_) | Self::EventStream(_) | Self::Upstream { .. } => false,
        }
    }
}

fn error_detail(body: &str) -> String {
    DeepSeekErrorResponse::message_from_body(body).unwrap_or_else(|| body.trim().to_owned())
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        let message = err.to_string();

        let api = match &err {
            TransportError::Status { status: 429, .. } => Self::rate_limited(message),
            TransportError::Status { status: 401, .. } => Self::unauthorized(message),
            TransportError::Status { status, .. } => Self::new(message)
                .with_status(*status)
                .with_retryable(*status >= 500),
            TransportError::Request(e) if e.is_connect() || e.is_timeout() => Self::connection(message),
            TransportError::Request(e) => match e.status() {
                Some(status) => Self::new(message).with_status(status.as_u16()),
                None => Self::new(message),
            },
            TransportError::Decode(_) | TransportError::EventStream(_) | TransportError::Upstream { .. } => {
                Self::new(message)
            }
        };

        api.with_source(err)
    }
}

impl ApiError {
    /// Classify a transport failure and prefix it with the failed operation
    pub fn from_transport(operation: &str, err: TransportError) -> Self {
        Self::from(err).context(operation)
    }
}
