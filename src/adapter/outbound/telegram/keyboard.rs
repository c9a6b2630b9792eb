//! Inline keyboards attached to bot messages.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::format::short_title;
use crate::domain::{CheckInterval, TrackedItem};

/// Yes/no confirmation under a parsed product card.
#[must_use]
pub fn confirm_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[
        InlineKeyboardButton::callback("✅ Да", "confirm:yes"),
        InlineKeyboardButton::callback("❌ Нет", "confirm:no"),
    ]])
}

/// One row per interval choice; `prefix` distinguishes the add flow
/// (`interval:`) from the settings flow (`int:`).
#[must_use]
pub fn interval_keyboard(prefix: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(CheckInterval::CHOICES.map(|interval| {
        let hours = interval.hours();
        vec![InlineKeyboardButton::callback(
            format!("{hours} {}", hours_word(hours)),
            format!("{prefix}:{hours}"),
        )]
    }))
}

fn hours_word(hours: u32) -> &'static str {
    if hours == 3 {
        "часа"
    } else {
        "часов"
    }
}

/// Single unsubscribe button under a price alert.
#[must_use]
pub fn unsubscribe_button(url: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        "Отписаться от товара",
        format!("unsub|{url}"),
    )]])
}

/// One unsubscribe row per tracked item, for `/list`.
#[must_use]
pub fn list_keyboard(items: &[TrackedItem]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(items.iter().map(|item| {
        vec![InlineKeyboardButton::callback(
            format!("Отписаться: {}", short_title(item)),
            format!("unsub|{}", item.url),
        )]
    }))
}
