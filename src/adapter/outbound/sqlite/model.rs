//! Database row types and row/domain conversions.
//!
//! Stored text fields are parsed fail-open: a malformed price or timestamp
//! becomes `None` and a malformed history becomes empty, so one corrupt row
//! can degrade but never crash a scan.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use super::schema::{tracking, user_settings};
use crate::domain::{PriceHistory, PricePoint, TrackedItem};

/// Database row for a tracked item.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = tracking)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrackingRow {
    pub user_id: i64,
    pub url: String,
    pub last_price: Option<String>,
    pub title: Option<String>,
    pub last_check: Option<String>,
    pub history: String,
    pub last_notified: Option<String>,
}

impl TrackingRow {
    /// Convert a stored row into the domain item.
    #[must_use]
    pub fn into_item(self) -> TrackedItem {
        TrackedItem {
            last_price: self.last_price.as_deref().and_then(|raw| parse_price(raw, &self.url)),
            last_check: self
                .last_check
                .as_deref()
                .and_then(|raw| parse_timestamp(raw, &self.url)),
            last_notified: self
                .last_notified
                .as_deref()
                .and_then(|raw| parse_timestamp(raw, &self.url)),
            history: parse_history(&self.history, &self.url),
            user_id: self.user_id,
            url: self.url,
            title: self.title,
        }
    }
}

/// Database row for per-user settings.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = user_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserSettingsRow {
    pub user_id: i64,
    pub interval_hours: i32,
}

fn parse_price(raw: &str, url: &str) -> Option<Decimal> {
    match Decimal::from_str(raw) {
        Ok(price) => Some(price),
        Err(e) => {
            warn!(url, raw, error = %e, "Malformed stored price, ignoring");
            None
        }
    }
}

pub(super) fn parse_timestamp(raw: &str, url: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            warn!(url, raw, error = %e, "Malformed stored timestamp, treating as never checked");
            None
        }
    }
}

pub(super) fn parse_history(raw: &str, url: &str) -> PriceHistory {
    match serde_json::from_str::<Vec<PricePoint>>(raw) {
        Ok(points) => PriceHistory::from_points(points),
        Err(e) => {
            warn!(url, error = %e, "Malformed stored history, treating as empty");
            PriceHistory::new()
        }
    }
}
