use std::fmt;

use bridge_config::ConfigError;
use thiserror::Error;

/// Boxed lower-level failure kept as the cause of a wrapped error
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while serving a chat completion
#[derive(Debug, Error)]
pub enum LlmError {
    /// Startup configuration failed validation; fatal
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Caller input was rejected; reported back as a tool error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The upstream call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl LlmError {
    /// Whether a caller-level retry is sensible
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(api) => api.is_retryable(),
            Self::Configuration(_) | Self::Validation(_) => false,
        }
    }

    /// Upstream HTTP status, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status(),
            Self::Configuration(_) | Self::Validation(_) => None,
        }
    }

    /// The upstream failure, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(api),
            Self::Configuration(_) | Self::Validation(_) => None,
        }
    }
}

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Location of the field, e.g. `messages[2].content`
    pub path: String,
    /// Why it was rejected
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Caller-supplied input failed validation
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// A validation failure with no field-level detail
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            issues: Vec::new(),
        }
    }

    /// Summarise a list of field issues into one failure
    pub fn from_issues(issues: Vec<FieldIssue>) -> Self {
        let detail = issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        Self {
            message: format!("invalid input: {detail}"),
            issues,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field-level detail, possibly empty
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }
}

/// Which upstream failure an `ApiError` represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Any other upstream transport or protocol failure
    Upstream,
    /// HTTP 429
    RateLimited,
    /// HTTP 401
    Unauthorized,
    /// DNS, connect, timeout or reset before a response arrived
    Connection,
}

/// An upstream transport or protocol failure
///
/// Carries the original lower-level error as its `source`, so the cause
/// chain survives every layer of wrapping.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    kind: ApiErrorKind,
    status: Option<u16>,
    retryable: bool,
    #[source]
    source: Option<BoxError>,
}

impl ApiError {
    /// A generic upstream failure; not retryable unless marked otherwise
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ApiErrorKind::Upstream,
            status: None,
            retryable: false,
            source: None,
        }
    }

    /// Upstream rejected the request for exceeding its rate limit
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::RateLimited,
            status: Some(429),
            retryable: true,
            ..Self::new(message)
        }
    }

    /// Upstream rejected the credentials
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            status: Some(401),
            retryable: false,
            ..Self::new(message)
        }
    }

    /// The upstream could not be reached
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Connection,
            retryable: true,
            ..Self::new(message)
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Prefix the message with the operation that failed
    #[must_use]
    pub fn context(mut self, operation: &str) -> Self {
        self.message = format!("{operation}: {}", self.message);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn is_retryable(&self) -> bool {
        self.retryable
    }
}
