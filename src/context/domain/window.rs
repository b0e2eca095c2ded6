//! Trailing date window over context entries.

use super::ContextDomainError;
use chrono::{Days, NaiveDate};
use mockable::Clock;

/// Inclusive trailing window of whole days ending today.
///
/// A window of `n` days admits every entry dated on or after
/// `today - n days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow {
    days: u32,
}

impl ContextWindow {
    /// Window used when the caller does not choose one.
    pub const DEFAULT_DAYS: u32 = 7;

    /// Creates a window spanning `days` days.
    ///
    /// # Errors
    ///
    /// Returns [`ContextDomainError::InvalidWindow`] for negative lengths.
    pub fn new(days: i64) -> Result<Self, ContextDomainError> {
        let days = u32::try_from(days).map_err(|_| ContextDomainError::InvalidWindow(days))?;
        Ok(Self { days })
    }

    /// Returns the window length in days.
    #[must_use]
    pub const fn days(self) -> u32 {
        self.days
    }

    /// Returns the earliest admitted entry date relative to `today`.
    #[must_use]
    pub fn since(self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Returns the earliest admitted entry date relative to the clock.
    #[must_use]
    pub fn since_today(self, clock: &impl Clock) -> NaiveDate {
        self.since(clock.utc().date_naive())
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            days: Self::DEFAULT_DAYS,
        }
    }
}
