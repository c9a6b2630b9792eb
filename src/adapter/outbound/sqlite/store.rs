//! SQLite tracking store implementation.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use tracing::warn;

use super::connection::{configure_sqlite_connection, DbPool};
use super::model::{parse_history, TrackingRow, UserSettingsRow};
use super::schema::{tracking, user_settings};
use crate::domain::{CheckInterval, TrackedItem};
use crate::error::{Error, Result};
use crate::port::outbound::store::TrackingStore;

/// SQLite-backed tracking store.
///
/// Each logical write is committed immediately; no transaction spans more
/// than one item.
pub struct SqliteTrackingStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteTrackingStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }
}

impl TrackingStore for SqliteTrackingStore {
    async fn upsert_item(
        &self,
        user_id: i64,
        url: &str,
        price: Decimal,
        title: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<TrackedItem> {
        let mut conn = self.conn()?;
        if let Err(e) = configure_sqlite_connection(&mut conn) {
            warn!(error = %e, "Failed to configure SQLite connection");
        }

        let existing: Option<TrackingRow> = tracking::table
            .find((user_id, url.to_string()))
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut history = existing
            .as_ref()
            .map(|row| parse_history(&row.history, url))
            .unwrap_or_default();
        history.push(at, price);

        let row = TrackingRow {
            user_id,
            url: url.to_string(),
            last_price: Some(price.to_string()),
            // Freshly fetched title wins; keep the stored one otherwise.
            title: title
                .map(str::to_owned)
                .or_else(|| existing.as_ref().and_then(|row| row.title.clone())),
            last_check: Some(at.to_rfc3339()),
            history: serde_json::to_string(history.points())
                .map_err(|e| Error::Parse(e.to_string()))?,
            last_notified: existing.and_then(|row| row.last_notified),
        };

        diesel::replace_into(tracking::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.into_item())
    }

    async fn get_item(&self, user_id: i64, url: &str) -> Result<Option<TrackedItem>> {
        let mut conn = self.conn()?;

        let row: Option<TrackingRow> = tracking::table
            .find((user_id, url.to_string()))
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.map(TrackingRow::into_item))
    }

    async fn remove_item(&self, user_id: i64, url: &str) -> Result<bool> {
        let mut conn = self.conn()?;
        if let Err(e) = configure_sqlite_connection(&mut conn) {
            warn!(error = %e, "Failed to configure SQLite connection");
        }

        let deleted = diesel::delete(tracking::table.find((user_id, url.to_string())))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn list_items(&self, user_id: i64) -> Result<Vec<TrackedItem>> {
        let mut conn = self.conn()?;

        let rows: Vec<TrackingRow> = tracking::table
            .filter(tracking::user_id.eq(user_id))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows.into_iter().map(TrackingRow::into_item).collect())
    }

    async fn list_users(&self) -> Result<Vec<i64>> {
        let mut conn = self.conn()?;

        tracking::table
            .select(tracking::user_id)
            .distinct()
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }

    async fn interval(&self, user_id: i64) -> Result<CheckInterval> {
        let mut conn = self.conn()?;

        let row: Option<UserSettingsRow> = user_settings::table
            .find(user_id)
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(match row {
            Some(settings) => CheckInterval::try_from_hours(i64::from(settings.interval_hours))
                .unwrap_or_else(|e| {
                    warn!(user_id, error = %e, "Stored interval out of range, using default");
                    CheckInterval::DEFAULT
                }),
            None => CheckInterval::DEFAULT,
        })
    }

    async fn set_interval(&self, user_id: i64, interval: CheckInterval) -> Result<()> {
        let mut conn = self.conn()?;
        if let Err(e) = configure_sqlite_connection(&mut conn) {
            warn!(error = %e, "Failed to configure SQLite connection");
        }

        let row = UserSettingsRow {
            user_id,
            interval_hours: interval.hours() as i32,
        };

        diesel::replace_into(user_settings::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}
