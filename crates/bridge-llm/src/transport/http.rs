use std::time::Duration;

use async_trait::async_trait;
use bridge_config::DeepSeekConfig;
use eventsource_stream::Eventsource;
use futures_util::{StreamExt, future};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};

use super::{ChatTransport, ChunkStream, TransportError};
use crate::protocol::{DeepSeekChunk, DeepSeekRequest, DeepSeekResponse};

/// Wait before the first retry; doubled for each further attempt
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Upper bound on a single retry wait
const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// SSE data payload that terminates a stream
const DONE_SENTINEL: &str = "[DONE]";

/// HTTP transport to the `DeepSeek` chat completions endpoint
///
/// Transient failures (429, 5xx, connect errors and timeouts) are retried up
/// to `max_retries` times with exponential backoff. Only sending the request
/// is retried; a stream that fails part-way is not restarted.
///
/// `request_timeout` bounds a whole non-streaming exchange. A stream is
/// bounded by it only while connecting and between reads, so long reasoning
/// streams are not cut off.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: SecretString,
    request_timeout: Duration,
    max_retries: u32,
    initial_backoff: Duration,
}

impl HttpTransport {
    /// Create a transport from the upstream settings
    pub fn new(config: &DeepSeekConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.request_timeout)
            .read_timeout(config.request_timeout)
            .build()?;
        let base = config.base_url.as_str().trim_end_matches('/');

        Ok(Self {
            client,
            endpoint: format!("{base}/chat/completions"),
            api_key: config.api_key.clone(),
            request_timeout: config.request_timeout,
            max_retries: config.max_retries,
            initial_backoff: INITIAL_BACKOFF,
        })
    }

    /// Override the first retry wait
    #[must_use]
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &DeepSeekRequest) -> Result<Response, TransportError> {
        let mut attempt = 0;

        loop {
            match self.post_once(request).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let wait = self.backoff(attempt);
                    tracing::warn!(attempt, wait_ms = %wait.as_millis(), error = %err, "retrying upstream request");
                    tokio::time::sleep(wait).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn post_once(&self, request: &DeepSeekRequest) -> Result<Response, TransportError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(request);

        if !request.stream {
            builder = builder.timeout(self.request_timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "upstream request failed");
                TransportError::Request(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "upstream returned error");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor).min(MAX_BACKOFF)
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &DeepSeekRequest) -> Result<DeepSeekResponse, TransportError> {
        let response = self.post(request).await?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_stream(&self, request: &DeepSeekRequest) -> Result<ChunkStream, TransportError> {
        let response = self.post(request).await?;

        let chunks = response
            .bytes_stream()
            .eventsource()
            .take_while(|event| future::ready(!matches!(event, Ok(e) if e.data.trim() == DONE_SENTINEL)))
            .filter(|event| future::ready(!matches!(event, Ok(e) if e.data.trim().is_empty())))
            .map(|event| match event {
                Ok(event) => parse_chunk(event.data.trim()),
                Err(e) => Err(TransportError::EventStream(e.to_string())),
            });

        Ok(Box::pin(chunks))
    }
}

/// Parse one SSE data payload, turning an in-band error object into a failure
fn parse_chunk(data: &str) -> Result<DeepSeekChunk, TransportError> {
    let chunk = serde_json::from_str::<DeepSeekChunk>(data).map_err(|e| {
        tracing::debug!(error = %e, data = %data, "unparseable SSE chunk");
        TransportError::Decode(e)
    })?;

    match chunk.error {
        Some(error) => {
            tracing::warn!(message = %error.message, "upstream reported an error mid-stream");
            Err(TransportError::Upstream { message: error.message })
        }
        None => Ok(chunk),
    }
}
