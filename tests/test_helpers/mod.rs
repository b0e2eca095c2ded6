//! Shared fixtures for integration tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use smart_todo::api::{AppState, Stores};
use smart_todo::assistant::adapters::scripted::ScriptedCompletionClient;
use std::sync::{Arc, Mutex, PoisonError};

/// Clock pinned to an instant that tests may move forward.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock reading `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Noon UTC on Wednesday 2024-01-03.
    pub fn standard() -> Self {
        Self::at(standard_instant())
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The instant [`FixedClock::standard`] reads.
pub fn standard_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0)
        .single()
        .expect("valid fixed instant")
}

/// Application wired over in-memory stores and a scripted assistant.
pub struct TestApp {
    /// Wired services.
    pub state: AppState,
    /// Scripted assistant shared with `state`.
    pub assistant: Arc<ScriptedCompletionClient>,
    /// Clock shared with `state`.
    pub clock: Arc<FixedClock>,
}

impl TestApp {
    /// Builds an application pinned to [`FixedClock::standard`].
    pub fn new() -> Self {
        let assistant = Arc::new(ScriptedCompletionClient::new());
        let clock = Arc::new(FixedClock::standard());
        let state = AppState::new(
            Stores::in_memory(),
            Arc::<ScriptedCompletionClient>::clone(&assistant),
            Arc::<FixedClock>::clone(&clock),
        );
        Self {
            state,
            assistant,
            clock,
        }
    }
}
