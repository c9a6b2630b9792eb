//! Message and callback handling logic.
//!
//! Private-chat bot: the chat id doubles as the user id for tracking keys.

use std::sync::Arc;

use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message};
use tracing::{info, warn};

use super::callback::{parse_callback, CallbackAction};
use super::command::{command_help, parse_command, BotCommand, CommandParseError};
use super::pending::{PendingSubmission, PendingSubmissions};
use crate::adapter::outbound::telegram::{format, keyboard};
use crate::domain::extract_supported_url;
use crate::error::Result;
use crate::port::outbound::{PriceFetcher, TrackingStore};

/// Shared dependencies of the chat handlers.
pub struct BotContext<S, F> {
    pub store: Arc<S>,
    pub fetcher: Arc<F>,
    pub pending: Arc<PendingSubmissions>,
}

impl<S, F> Clone for BotContext<S, F> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            fetcher: Arc::clone(&self.fetcher),
            pending: Arc::clone(&self.pending),
        }
    }
}

/// Handle an incoming text message: commands, product links, everything else.
pub async fn handle_message<S, F>(bot: Bot, msg: Message, ctx: BotContext<S, F>) -> Result<()>
where
    S: TrackingStore,
    F: PriceFetcher,
{
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    match parse_command(text) {
        Ok(BotCommand::Start | BotCommand::Help) => {
            bot.send_message(chat_id, command_help()).await?;
            return Ok(());
        }
        Ok(BotCommand::List) => return send_list(&bot, chat_id, &ctx).await,
        Ok(BotCommand::Settings) => return send_settings(&bot, chat_id, &ctx).await,
        Err(CommandParseError::UnknownCommand(_)) => {
            bot.send_message(chat_id, command_help()).await?;
            return Ok(());
        }
        Err(CommandParseError::NotACommand) => {}
    }

    let Some((marketplace, url)) = extract_supported_url(text) else {
        // A link to some other site gets a rejection; plain chatter is ignored.
        if looks_like_link(text) {
            bot.send_message(chat_id, format::UNSUPPORTED_SITE).await?;
        }
        return Ok(());
    };

    bot.send_message(chat_id, format::LINK_RECEIVED).await?;

    let fetched = ctx.fetcher.fetch(marketplace, &url).await;
    let Some(price) = fetched.price else {
        bot.send_message(chat_id, format::FETCH_FAILED).await?;
        return Ok(());
    };

    info!(
        chat_id = chat_id.0,
        marketplace = %marketplace,
        url = %url,
        price = %price,
        "Link parsed, awaiting confirmation"
    );

    ctx.pending.put(
        chat_id.0,
        PendingSubmission {
            marketplace,
            url,
            title: fetched.title.clone(),
            price,
            received_at: Utc::now(),
        },
    );

    bot.send_message(
        chat_id,
        format::format_confirmation(fetched.title.as_deref(), price),
    )
    .reply_markup(keyboard::confirm_keyboard())
    .await?;

    Ok(())
}

fn looks_like_link(text: &str) -> bool {
    text.contains("http://") || text.contains("https://") || text.contains("www.")
}

async fn send_list<S, F>(bot: &Bot, chat_id: ChatId, ctx: &BotContext<S, F>) -> Result<()>
where
    S: TrackingStore,
    F: PriceFetcher,
{
    let items = ctx.store.list_items(chat_id.0).await?;
    if items.is_empty() {
        bot.send_message(chat_id, format::NO_ITEMS).await?;
        return Ok(());
    }

    bot.send_message(chat_id, format::format_list(&items))
        .reply_markup(keyboard::list_keyboard(&items))
        .await?;
    Ok(())
}

async fn send_settings<S, F>(bot: &Bot, chat_id: ChatId, ctx: &BotContext<S, F>) -> Result<()>
where
    S: TrackingStore,
    F: PriceFetcher,
{
    let current = ctx.store.interval(chat_id.0).await?;
    bot.send_message(chat_id, format::format_settings(current))
        .reply_markup(keyboard::interval_keyboard("int"))
        .await?;
    Ok(())
}

/// Handle an inline-keyboard callback.
pub async fn handle_callback<S, F>(
    bot: Bot,
    query: CallbackQuery,
    ctx: BotContext<S, F>,
) -> Result<()>
where
    S: TrackingStore,
    F: PriceFetcher,
{
    let action = query.data.as_deref().and_then(parse_callback);
    let Some(action) = action else {
        warn!(data = ?query.data, "Unknown callback data");
        bot.answer_callback_query(query.id).await?;
        return Ok(());
    };

    let Some(message) = query.regular_message().cloned() else {
        bot.answer_callback_query(query.id).await?;
        return Ok(());
    };
    let chat_id = message.chat.id;

    match action {
        CallbackAction::ConfirmAdd => {
            bot.answer_callback_query(query.id).await?;
            bot.send_message(chat_id, format::CHOOSE_INTERVAL)
                .reply_markup(keyboard::interval_keyboard("interval"))
                .await?;
        }
        CallbackAction::CancelAdd => {
            ctx.pending.discard(chat_id.0);
            bot.answer_callback_query(query.id).await?;
            bot.edit_message_text(chat_id, message.id, format::CANCELLED)
                .await?;
        }
        CallbackAction::ItemInterval(interval) => {
            let Some(submission) = ctx.pending.take(chat_id.0, Utc::now()) else {
                bot.answer_callback_query(query.id)
                    .text(format::PENDING_EXPIRED)
                    .show_alert(true)
                    .await?;
                return Ok(());
            };

            ctx.store
                .upsert_item(
                    chat_id.0,
                    &submission.url,
                    submission.price,
                    submission.title.as_deref(),
                    Utc::now(),
                )
                .await?;
            ctx.store.set_interval(chat_id.0, interval).await?;

            info!(
                chat_id = chat_id.0,
                url = %submission.url,
                interval_hours = interval.hours(),
                "Item added to tracking"
            );

            bot.answer_callback_query(query.id).await?;
            bot.send_message(chat_id, format::format_added(interval))
                .await?;
        }
        CallbackAction::UserInterval(interval) => {
            ctx.store.set_interval(chat_id.0, interval).await?;
            bot.answer_callback_query(query.id).await?;
            bot.edit_message_text(chat_id, message.id, format::format_interval_set(interval))
                .await?;
        }
        CallbackAction::Unsubscribe(url) => {
            // Idempotent: repeated taps on a stale button are fine.
            ctx.store.remove_item(chat_id.0, &url).await?;
            bot.edit_message_reply_markup(chat_id, message.id).await?;
            bot.answer_callback_query(query.id)
                .text(format::UNSUBSCRIBED)
                .show_alert(true)
                .await?;
        }
    }

    Ok(())
}
