//! OpenAI-compatible chat completions adapter.

use crate::assistant::ports::{
    CompletionClient, CompletionError, CompletionErrorKind, CompletionRequest, CompletionResult,
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    /// Base URL, for example `https://api.openai.com/v1`.
    pub base_url: String,
    /// Bearer token; omitted for local servers that need none.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Completion client speaking the `/chat/completions` protocol.
#[derive(Clone)]
pub struct OpenAiCompletionClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl std::fmt::Debug for OpenAiCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompletionClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Checks that the base URL keeps the API key off cleartext links.
///
/// HTTPS is always accepted; plain HTTP only for loopback hosts.
///
/// # Errors
///
/// Returns a [`CompletionErrorKind::Configuration`] error for unparsable
/// URLs, unsupported schemes and remote plain-HTTP hosts.
pub fn validate_base_url(base_url: &str) -> CompletionResult<Url> {
    let parsed = Url::parse(base_url).map_err(|err| {
        CompletionError::new(
            CompletionErrorKind::Configuration,
            format!("invalid base URL '{base_url}': {err}"),
        )
    })?;

    match parsed.scheme() {
        "https" => Ok(parsed),
        "http" => {
            let host = parsed.host_str().unwrap_or_default();
            let is_loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1");
            if is_loopback {
                warn!(base_url, "using plain HTTP for a local completion server");
                Ok(parsed)
            } else {
                Err(CompletionError::new(
                    CompletionErrorKind::Configuration,
                    format!("plain HTTP is only allowed for loopback hosts, got '{base_url}'"),
                ))
            }
        }
        scheme => Err(CompletionError::new(
            CompletionErrorKind::Configuration,
            format!("unsupported scheme '{scheme}' in base URL '{base_url}'"),
        )),
    }
}

impl OpenAiCompletionClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`CompletionErrorKind::Configuration`] error when the base
    /// URL is rejected or the HTTP client cannot be built.
    pub fn new(settings: OpenAiSettings) -> CompletionResult<Self> {
        validate_base_url(&settings.base_url)?;
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| {
                CompletionError::new(CompletionErrorKind::Configuration, err.to_string())
            })?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/chat/completions",
                settings.base_url.trim_end_matches('/')
            ),
            api_key: settings.api_key.filter(|key| !key.trim().is_empty()),
            model: settings.model,
        })
    }

    /// Returns the chat completions URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_prompt },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema_name,
                    "strict": true,
                    "schema": request.schema,
                },
            },
        })
    }
}

fn transport_error(err: &reqwest::Error) -> CompletionError {
    let kind = if err.is_timeout() {
        CompletionErrorKind::Timeout
    } else {
        CompletionErrorKind::Network
    };
    CompletionError::new(kind, err.to_string())
}

/// Extracts the JSON document carried in the first choice's message.
fn reply_content(body: &Value) -> CompletionResult<Value> {
    let message = body
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| {
            CompletionError::new(CompletionErrorKind::InvalidResponse, "reply has no choices")
        })?;

    if let Some(refusal) = message.get("refusal").and_then(Value::as_str) {
        return Err(CompletionError::new(
            CompletionErrorKind::InvalidResponse,
            format!("model refused: {refusal}"),
        ));
    }

    let content = message
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            CompletionError::new(CompletionErrorKind::InvalidResponse, "reply has no content")
        })?;

    serde_json::from_str(content).map_err(|err| {
        CompletionError::new(
            CompletionErrorKind::InvalidResponse,
            format!("reply content is not JSON: {err}"),
        )
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text.get(..cut).map_or_else(String::new, |head| format!("{head}...")),
        None => text.to_owned(),
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> CompletionResult<Value> {
        let body = self.request_body(&request);
        info!(
            operation = request.operation,
            model = %self.model,
            max_tokens = request.max_tokens,
            "calling completion service"
        );

        let mut builder = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|err| {
            error!(operation = request.operation, error = %err, "completion request failed");
            transport_error(&err)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| transport_error(&err))?;

        if !status.is_success() {
            let failure = CompletionError::from_status(status.as_u16(), truncate(&text, 300));
            error!(
                operation = request.operation,
                status = status.as_u16(),
                kind = %failure.kind,
                "completion service returned an error"
            );
            return Err(failure);
        }

        debug!(operation = request.operation, reply = %truncate(&text, 2000), "completion reply");
        let envelope: Value = serde_json::from_str(&text).map_err(|err| {
            CompletionError::new(
                CompletionErrorKind::InvalidResponse,
                format!("reply is not JSON: {err}"),
            )
        })?;
        reply_content(&envelope)
    }
}
