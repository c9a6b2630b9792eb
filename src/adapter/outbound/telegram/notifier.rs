//! Telegram delivery of price alerts.
//!
//! Spawns a background worker that renders the optional history chart and
//! sends the alert as a photo-with-caption or a plain message.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use teloxide::prelude::*;
use teloxide::types::InputFile;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::format::format_alert;
use super::keyboard;
use crate::adapter::outbound::chart::render_history_chart;
use crate::error::Result;
use crate::port::outbound::notifier::{ChangeNotifier, PriceAlert};

/// Telegram notifier that sends alerts to the tracking user's chat.
///
/// Implements [`ChangeNotifier`]; delivery happens on a spawned worker so
/// `notify` returns immediately.
pub struct TelegramNotifier {
    /// Channel sender for queuing outbound alerts.
    sender: mpsc::UnboundedSender<PriceAlert>,
}

impl TelegramNotifier {
    /// Create a new notifier and spawn its delivery worker.
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(telegram_worker(bot, receiver));
        Self { sender }
    }
}

impl ChangeNotifier for TelegramNotifier {
    fn notify(&self, alert: PriceAlert) {
        if self.sender.send(alert).is_err() {
            warn!("Telegram notifier channel closed");
        }
    }
}

/// Background worker that delivers alerts.
async fn telegram_worker(bot: Bot, mut receiver: mpsc::UnboundedReceiver<PriceAlert>) {
    info!("Telegram notifier started");

    while let Some(alert) = receiver.recv().await {
        if let Err(e) = deliver(&bot, alert).await {
            error!(error = %e, "Failed to send price alert");
        }
    }

    warn!("Telegram notifier worker shutting down");
}

async fn deliver(bot: &Bot, alert: PriceAlert) -> Result<()> {
    let chat_id = ChatId(alert.user_id);
    let text = format_alert(&alert);
    let markup = alert
        .change
        .offer_unsubscribe
        .then(|| keyboard::unsubscribe_button(&alert.url));

    if alert.change.chartable {
        let path = chart_path(alert.user_id);
        let points = alert.history.clone();
        let render_path = path.clone();
        let rendered =
            tokio::task::spawn_blocking(move || render_history_chart(&points, &render_path)).await;

        match rendered {
            Ok(Ok(())) => {
                let mut request = bot
                    .send_photo(chat_id, InputFile::file(path.clone()))
                    .caption(text);
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                let sent = request.await;
                let _ = std::fs::remove_file(&path);
                sent?;
                return Ok(());
            }
            Ok(Err(e)) => warn!(error = %e, "Chart rendering failed, sending text only"),
            Err(e) => warn!(error = %e, "Chart rendering task panicked, sending text only"),
        }
    }

    let mut request = bot.send_message(chat_id, text);
    if let Some(markup) = markup {
        request = request.reply_markup(markup);
    }
    request.await?;
    Ok(())
}

fn chart_path(user_id: i64) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("pricewatch-chart-{user_id}-{nanos}.png"))
}
