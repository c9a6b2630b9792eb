//! Shared fixtures for integration tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rust_decimal::Decimal;

use pricewatch::adapter::outbound::sqlite::{
    create_pool, run_migrations, DbPool, SqliteTrackingStore,
};
use pricewatch::domain::Marketplace;
use pricewatch::port::outbound::{ChangeNotifier, FetchedPrice, PriceAlert, PriceFetcher};

/// Temporary SQLite database for integration tests.
pub struct TempDb {
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        path.push(format!("pricewatch-{name}-{nanos}.db"));

        let url = path.display().to_string();
        let pool = create_pool(&url).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self { path, pool }
    }

    pub fn store(&self) -> SqliteTrackingStore {
        SqliteTrackingStore::new(self.pool.clone())
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Fetcher that replays scripted per-URL responses.
///
/// Each `push` enqueues one response for a URL; a fetch with nothing queued
/// returns the empty outcome, like a blocked page would.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<String, Vec<FetchedPrice>>>,
    delay: Option<Duration>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch sleeps first; used to hold a scan open.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            delay: Some(delay),
        }
    }

    pub fn push(&self, url: &str, price: Option<Decimal>, title: Option<&str>) {
        self.responses
            .lock()
            .expect("lock scripted responses")
            .entry(url.to_string())
            .or_default()
            .push(FetchedPrice {
                price,
                title: title.map(str::to_owned),
            });
    }
}

impl PriceFetcher for ScriptedFetcher {
    async fn fetch(&self, _marketplace: Marketplace, url: &str) -> FetchedPrice {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut responses = self.responses.lock().expect("lock scripted responses");
        match responses.get_mut(url) {
            Some(queue) if !queue.is_empty() => queue.remove(0),
            _ => FetchedPrice::empty(),
        }
    }
}

/// Thread-safe alert collector for notification assertions.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<PriceAlert>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<PriceAlert> {
        self.alerts.lock().expect("lock recorded alerts").clone()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn notify(&self, alert: PriceAlert) {
        self.alerts
            .lock()
            .expect("lock recorded alerts")
            .push(alert);
    }
}
