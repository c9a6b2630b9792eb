//! Tracked item state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::history::PriceHistory;

/// A product under periodic price surveillance, keyed by `(user_id, url)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedItem {
    pub user_id: i64,
    pub url: String,
    pub title: Option<String>,
    pub last_price: Option<Decimal>,
    pub last_check: Option<DateTime<Utc>>,
    pub history: PriceHistory,
    /// Reserved in the schema; never read or written by the tracking logic.
    pub last_notified: Option<DateTime<Utc>>,
}

impl TrackedItem {
    /// Title to show in lists and notifications, falling back to the URL.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }
}
