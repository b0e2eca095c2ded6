//! Completion port: one structured request, one JSON reply.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Result type for completion calls.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// A single structured completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Assistant operation name, used for logging.
    pub operation: &'static str,
    /// Instruction framing the model's role.
    pub system_prompt: String,
    /// Rendered prompt carrying the task and context data.
    pub user_prompt: String,
    /// Name attached to the response schema.
    pub schema_name: &'static str,
    /// JSON schema the reply must satisfy.
    pub schema: Value,
    /// Sampling temperature.
    pub temperature: f64,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// External completion service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the request and returns the reply parsed as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the call fails or the reply is not a
    /// JSON document.
    async fn complete(&self, request: CompletionRequest) -> CompletionResult<Value>;
}

/// Why a completion call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionErrorKind {
    /// 401/403: missing or rejected credentials.
    Auth,
    /// 429: rate limited or quota exhausted.
    RateLimit,
    /// The request timed out.
    Timeout,
    /// Connection, DNS or TLS failure.
    Network,
    /// 5xx from the provider.
    Server,
    /// The reply could not be read as a JSON document.
    InvalidResponse,
    /// Client misconfiguration detected before sending.
    Configuration,
    /// Anything else.
    Other,
}

impl CompletionErrorKind {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Auth,
            402 | 429 => Self::RateLimit,
            408 | 504 => Self::Timeout,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for CompletionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Auth => "auth",
            Self::RateLimit => "rate_limit",
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::Server => "server",
            Self::InvalidResponse => "invalid_response",
            Self::Configuration => "configuration",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

/// Classified completion failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionError {
    /// Failure class.
    pub kind: CompletionErrorKind,
    /// HTTP status, when the provider answered.
    pub status: Option<u16>,
    /// Provider or transport message.
    pub message: String,
}

impl CompletionError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: CompletionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    /// Classifies a non-success HTTP reply.
    #[must_use]
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            kind: CompletionErrorKind::from_status(status),
            status: Some(status),
            message: body.into(),
        }
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} failure ({status}): {}", self.kind, self.message),
            None => write!(f, "{} failure: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for CompletionError {}
