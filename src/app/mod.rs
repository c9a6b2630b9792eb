//! Application wiring.

pub mod scheduler;

pub use scheduler::{ScanSummary, Scheduler};

use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use tokio::sync::watch;
use tracing::info;

use crate::adapter::inbound::bot::{run_bot, BotContext, PendingSubmissions};
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteTrackingStore};
use crate::adapter::outbound::telegram::TelegramNotifier;
use crate::adapter::outbound::web::{PageClient, WebPriceFetcher};
use crate::config::Config;
use crate::error::Result;

/// Main application: builds the adapters, starts the scheduler and runs the
/// bot dispatcher in the foreground.
pub struct App;

impl App {
    /// Run until the dispatcher stops (ctrl-c).
    pub async fn run(config: Config) -> Result<()> {
        let db_pool = create_pool(&config.database)?;
        run_migrations(&db_pool)?;
        info!(database = %config.database, "Database initialized");

        let store = Arc::new(SqliteTrackingStore::new(db_pool));
        let fetcher = Arc::new(WebPriceFetcher::new(PageClient::new(&config.fetcher)?));

        let bot = Bot::new(config.telegram.bot_token.clone());
        let notifier = Arc::new(TelegramNotifier::new(bot.clone()));

        let scheduler = Arc::new(Scheduler::new(
            Arc::clone(&store),
            Arc::clone(&fetcher),
            notifier,
            Duration::from_secs(config.scheduler.tick_minutes * 60),
        ));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler_handle = tokio::spawn(scheduler.run(shutdown_rx));

        let ctx = BotContext {
            store,
            fetcher,
            pending: Arc::new(PendingSubmissions::new()),
        };
        run_bot(bot, ctx).await;

        // The dispatcher exited; stop the scan loop as well.
        let _ = shutdown_tx.send(true);
        let _ = scheduler_handle.await;

        Ok(())
    }
}
