//! Periodic price re-check loop.
//!
//! A short global tick polls the store; per-user intervals decide which
//! items actually get re-fetched on a given pass. This keeps one timer for
//! any number of users.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::domain::{evaluate, is_due, Marketplace};
use crate::port::outbound::notifier::{ChangeNotifier, PriceAlert};
use crate::port::outbound::{PriceFetcher, TrackingStore};

/// Counters from one scanning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub users: usize,
    pub due: usize,
    pub updated: usize,
    pub notified: usize,
}

/// Drives fetch, compare, persist and notify for all due items.
pub struct Scheduler<S, F, N> {
    store: Arc<S>,
    fetcher: Arc<F>,
    notifier: Arc<N>,
    tick: Duration,
    /// Single-flight guard: a tick that fires while a scan is still running
    /// is skipped instead of overlapping it.
    scan_guard: Mutex<()>,
}

impl<S, F, N> Scheduler<S, F, N>
where
    S: TrackingStore,
    F: PriceFetcher,
    N: ChangeNotifier,
{
    #[must_use]
    pub fn new(store: Arc<S>, fetcher: Arc<F>, notifier: Arc<N>, tick: Duration) -> Self {
        Self {
            store,
            fetcher,
            notifier,
            tick,
            scan_guard: Mutex::new(()),
        }
    }

    /// Run the tick loop until the shutdown signal flips.
    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(tick_secs = self.tick.as_secs(), "Scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(summary) = self.scan().await {
                        if summary.due > 0 {
                            info!(
                                users = summary.users,
                                due = summary.due,
                                updated = summary.updated,
                                notified = summary.notified,
                                "Scan pass complete"
                            );
                        }
                    }
                }
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Scheduler shutting down");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// One scanning pass over all users and their due items.
    ///
    /// Returns `None` when a previous pass is still in flight. Store and
    /// fetch failures degrade to skipped items; a pass never aborts the
    /// loop.
    pub async fn scan(&self) -> Option<ScanSummary> {
        let Ok(_guard) = self.scan_guard.try_lock() else {
            warn!("Previous scan still running, skipping tick");
            return None;
        };

        let mut summary = ScanSummary::default();

        let users = match self.store.list_users().await {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "Failed to enumerate users");
                return Some(summary);
            }
        };
        summary.users = users.len();

        for user_id in users {
            let interval = match self.store.interval(user_id).await {
                Ok(interval) => interval,
                Err(e) => {
                    warn!(user_id, error = %e, "Failed to read interval, skipping user");
                    continue;
                }
            };

            let items = match self.store.list_items(user_id).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(user_id, error = %e, "Failed to list items, skipping user");
                    continue;
                }
            };

            for item in items {
                if !is_due(item.last_check, interval, Utc::now()) {
                    continue;
                }
                summary.due += 1;

                let Some(marketplace) = Marketplace::detect(&item.url) else {
                    warn!(user_id, url = %item.url, "Stored URL no longer recognized, skipping");
                    continue;
                };

                let fetched = self.fetcher.fetch(marketplace, &item.url).await;
                let Some(price) = fetched.price else {
                    // last_check stays untouched so the next tick retries.
                    debug!(user_id, url = %item.url, "Fetch failed, retrying next tick");
                    continue;
                };

                let previous = item.last_price;
                let updated = match self
                    .store
                    .upsert_item(user_id, &item.url, price, fetched.title.as_deref(), Utc::now())
                    .await
                {
                    Ok(updated) => updated,
                    Err(e) => {
                        warn!(user_id, url = %item.url, error = %e, "Failed to persist observation");
                        continue;
                    }
                };
                summary.updated += 1;

                if let Some(change) = evaluate(previous, price, &updated.history) {
                    summary.notified += 1;
                    self.notifier.notify(PriceAlert {
                        user_id,
                        url: updated.url.clone(),
                        title: updated.title.clone(),
                        change,
                        history: updated.history.points().to_vec(),
                    });
                }
            }
        }

        Some(summary)
    }
}
