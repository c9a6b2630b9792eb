//! Per-user re-check interval policy.

use chrono::{DateTime, Duration, Utc};

use super::error::DomainError;

/// How often a user's tracked items are re-fetched, in hours.
///
/// Only the values offered by the settings keyboard are representable;
/// construction from anything else fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInterval(u32);

impl CheckInterval {
    /// Default interval for users who never opened settings.
    pub const DEFAULT: Self = Self(6);

    /// The intervals offered in the settings keyboard.
    pub const CHOICES: [Self; 4] = [Self(3), Self(6), Self(9), Self(12)];

    /// Validate an hour count against the allowed set.
    ///
    /// # Errors
    /// Returns [`DomainError::UnsupportedInterval`] for values outside
    /// {3, 6, 9, 12}.
    pub fn try_from_hours(hours: i64) -> Result<Self, DomainError> {
        match hours {
            3 | 6 | 9 | 12 => Ok(Self(hours as u32)),
            _ => Err(DomainError::UnsupportedInterval { hours }),
        }
    }

    #[must_use]
    pub const fn hours(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::hours(i64::from(self.0))
    }
}

impl Default for CheckInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for CheckInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decide whether an item is due for a re-check.
///
/// An item that was never checked is always due. Otherwise it is due once
/// the full interval has elapsed since the last check (inclusive boundary).
#[must_use]
pub fn is_due(
    last_check: Option<DateTime<Utc>>,
    interval: CheckInterval,
    now: DateTime<Utc>,
) -> bool {
    match last_check {
        None => true,
        Some(checked) => now >= checked + interval.as_duration(),
    }
}
