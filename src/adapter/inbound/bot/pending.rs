//! Per-chat pending submission state.
//!
//! The confirmation handshake between "link received" and "interval chosen"
//! lives here. At most one submission per chat; a new link overwrites the
//! old one, confirming consumes it, and stale entries expire. Nothing is
//! persisted: a restart simply asks the user to resend the link.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::Marketplace;

/// A parsed product awaiting the user's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub marketplace: Marketplace,
    pub url: String,
    pub title: Option<String>,
    pub price: Decimal,
    pub received_at: DateTime<Utc>,
}

/// Session-scoped map of pending submissions, keyed by chat id.
pub struct PendingSubmissions {
    inner: Mutex<HashMap<i64, PendingSubmission>>,
    ttl: Duration,
}

impl PendingSubmissions {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(15))
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Store a submission, replacing any previous one for the chat.
    pub fn put(&self, chat_id: i64, submission: PendingSubmission) {
        self.inner.lock().insert(chat_id, submission);
    }

    /// Consume the chat's submission. Expired entries are dropped and
    /// reported as absent.
    pub fn take(&self, chat_id: i64, now: DateTime<Utc>) -> Option<PendingSubmission> {
        let submission = self.inner.lock().remove(&chat_id)?;
        (now - submission.received_at <= self.ttl).then_some(submission)
    }

    /// Drop the chat's submission, if any.
    pub fn discard(&self, chat_id: i64) {
        self.inner.lock().remove(&chat_id);
    }
}

impl Default for PendingSubmissions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn t0() -> DateTime<Utc> {
        "2026-06-01T12:00:00Z".parse().unwrap()
    }

    fn submission(url: &str, at: DateTime<Utc>) -> PendingSubmission {
        PendingSubmission {
            marketplace: Marketplace::Ozon,
            url: url.into(),
            title: Some("Widget".into()),
            price: dec!(1200),
            received_at: at,
        }
    }

    #[test]
    fn take_consumes_the_submission() {
        let pending = PendingSubmissions::new();
        pending.put(1, submission("https://www.ozon.ru/a", t0()));

        assert!(pending.take(1, t0()).is_some());
        assert!(pending.take(1, t0()).is_none());
    }

    #[test]
    fn new_link_overwrites_previous() {
        let pending = PendingSubmissions::new();
        pending.put(1, submission("https://www.ozon.ru/a", t0()));
        pending.put(1, submission("https://www.ozon.ru/b", t0()));

        let taken = pending.take(1, t0()).unwrap();
        assert_eq!(taken.url, "https://www.ozon.ru/b");
    }

    #[test]
    fn chats_are_independent() {
        let pending = PendingSubmissions::new();
        pending.put(1, submission("https://www.ozon.ru/a", t0()));

        assert!(pending.take(2, t0()).is_none());
        assert!(pending.take(1, t0()).is_some());
    }

    #[test]
    fn expired_submission_is_dropped() {
        let pending = PendingSubmissions::with_ttl(Duration::minutes(15));
        pending.put(1, submission("https://www.ozon.ru/a", t0()));

        assert!(pending.take(1, t0() + Duration::minutes(16)).is_none());
        // And it is gone, not resurrectable.
        assert!(pending.take(1, t0()).is_none());
    }

    #[test]
    fn submission_at_ttl_boundary_is_kept() {
        let pending = PendingSubmissions::with_ttl(Duration::minutes(15));
        pending.put(1, submission("https://www.ozon.ru/a", t0()));

        assert!(pending.take(1, t0() + Duration::minutes(15)).is_some());
    }

    #[test]
    fn discard_removes_without_returning() {
        let pending = PendingSubmissions::new();
        pending.put(1, submission("https://www.ozon.ru/a", t0()));
        pending.discard(1);

        assert!(pending.take(1, t0()).is_none());
    }
}
