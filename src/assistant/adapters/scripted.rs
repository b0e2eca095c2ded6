//! Scripted completion client for tests and offline runs.

use crate::assistant::ports::{
    CompletionClient, CompletionError, CompletionErrorKind, CompletionRequest, CompletionResult,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Completion client that replays queued replies in order.
///
/// Every call is recorded, so tests can assert how often the service was
/// reached and with which prompts. An exhausted queue yields an
/// [`CompletionErrorKind::Other`] failure.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCompletionClient {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: VecDeque<CompletionResult<Value>>,
    requests: Vec<CompletionRequest>,
}

impl ScriptedCompletionClient {
    /// Creates a client with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn push_reply(&self, reply: Value) {
        self.push(Ok(reply));
    }

    /// Queues a failure.
    pub fn push_failure(&self, failure: CompletionError) {
        self.push(Err(failure));
    }

    fn push(&self, outcome: CompletionResult<Value>) {
        if let Ok(mut state) = self.state.lock() {
            state.replies.push_back(outcome);
        }
    }

    /// Returns how many calls have been made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().map_or(0, |state| state.requests.len())
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state
            .lock()
            .map_or_else(|_| Vec::new(), |state| state.requests.clone())
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> CompletionResult<Value> {
        let mut state = self.state.lock().map_err(|err| {
            CompletionError::new(CompletionErrorKind::Other, err.to_string())
        })?;
        state.requests.push(request);
        state.replies.pop_front().unwrap_or_else(|| {
            Err(CompletionError::new(
                CompletionErrorKind::Other,
                "no scripted reply left",
            ))
        })
    }
}
