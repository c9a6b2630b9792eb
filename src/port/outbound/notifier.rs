//! Notification port for price-change alerts.

use crate::domain::{PriceChange, PricePoint};

/// A price-change alert addressed to a user.
///
/// Carries everything a delivery adapter needs: the change decision plus
/// the history samples for an optional chart.
#[derive(Debug, Clone)]
pub struct PriceAlert {
    /// Chat to deliver to (private chats share the user's id).
    pub user_id: i64,
    pub url: String,
    pub title: Option<String>,
    pub change: PriceChange,
    /// History after the triggering observation, oldest first.
    pub history: Vec<PricePoint>,
}

/// Delivers price-change alerts to users.
///
/// Notifications are fire-and-forget: `notify` must return quickly, so
/// implementations doing slow I/O should hand the alert off to a task.
pub trait ChangeNotifier: Send + Sync {
    fn notify(&self, alert: PriceAlert);
}

/// A no-op notifier for tests or when delivery is disabled.
pub struct NullNotifier;

impl ChangeNotifier for NullNotifier {
    fn notify(&self, _alert: PriceAlert) {}
}

/// Logs alerts via tracing instead of delivering them.
pub struct LogNotifier;

impl ChangeNotifier for LogNotifier {
    fn notify(&self, alert: PriceAlert) {
        use tracing::info;
        info!(
            user_id = alert.user_id,
            url = %alert.url,
            previous = %alert.change.previous,
            current = %alert.change.current,
            unsubscribe = alert.change.offer_unsubscribe,
            chart = alert.change.chartable,
            "Price change"
        );
    }
}
