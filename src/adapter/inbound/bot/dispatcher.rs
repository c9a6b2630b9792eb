//! Telegram dispatcher wiring.

use teloxide::prelude::*;
use teloxide::types::{BotCommand as MenuCommand, CallbackQuery, Message};
use teloxide::{dptree, RequestError};
use tracing::{error, info, warn};

use super::command::bot_commands;
use super::handler::{handle_callback, handle_message, BotContext};
use crate::port::outbound::{PriceFetcher, TrackingStore};

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), RequestError> {
    let commands: Vec<MenuCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| MenuCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}

/// Run the bot dispatcher until it stops (ctrl-c).
pub async fn run_bot<S, F>(bot: Bot, ctx: BotContext<S, F>)
where
    S: TrackingStore + 'static,
    F: PriceFetcher + 'static,
{
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!("Telegram dispatcher started");

    let message_branch = Update::filter_message().endpoint({
        let ctx = ctx.clone();
        move |bot: Bot, msg: Message| {
            let ctx = ctx.clone();
            async move {
                if let Err(e) = handle_message(bot, msg, ctx).await {
                    error!(error = %e, "Message handler failed");
                }
                respond(())
            }
        }
    });

    let callback_branch = Update::filter_callback_query().endpoint({
        let ctx = ctx.clone();
        move |bot: Bot, query: CallbackQuery| {
            let ctx = ctx.clone();
            async move {
                if let Err(e) = handle_callback(bot, query, ctx).await {
                    error!(error = %e, "Callback handler failed");
                }
                respond(())
            }
        }
    });

    Dispatcher::builder(
        bot,
        dptree::entry()
            .branch(message_branch)
            .branch(callback_branch),
    )
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}
