//! Persistence port for tracked items and user settings.

use std::future::Future;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{CheckInterval, TrackedItem};
use crate::error::Result;

/// Storage operations for tracked items and per-user settings.
pub trait TrackingStore: Send + Sync {
    /// Insert or overwrite an item's price/title/check timestamp and append
    /// the observation to its history (oldest entries evicted beyond the
    /// cap). Returns the updated item.
    fn upsert_item(
        &self,
        user_id: i64,
        url: &str,
        price: Decimal,
        title: Option<&str>,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<TrackedItem>> + Send;

    /// Get one item by its `(user_id, url)` key.
    fn get_item(
        &self,
        user_id: i64,
        url: &str,
    ) -> impl Future<Output = Result<Option<TrackedItem>>> + Send;

    /// Delete an item. Idempotent: returns whether a row existed.
    fn remove_item(&self, user_id: i64, url: &str) -> impl Future<Output = Result<bool>> + Send;

    /// All items tracked by a user. Ordering carries no meaning.
    fn list_items(&self, user_id: i64) -> impl Future<Output = Result<Vec<TrackedItem>>> + Send;

    /// Distinct users that have at least one tracked item.
    fn list_users(&self) -> impl Future<Output = Result<Vec<i64>>> + Send;

    /// A user's check interval, defaulting when unset or unparseable.
    fn interval(&self, user_id: i64) -> impl Future<Output = Result<CheckInterval>> + Send;

    /// Upsert a user's check interval.
    fn set_interval(
        &self,
        user_id: i64,
        interval: CheckInterval,
    ) -> impl Future<Output = Result<()>> + Send;
}
