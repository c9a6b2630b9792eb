//! Inline-keyboard callback parsing.

use crate::domain::CheckInterval;

/// Actions carried in callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// `confirm:yes` under the confirmation card.
    ConfirmAdd,
    /// `confirm:no` under the confirmation card.
    CancelAdd,
    /// `interval:<h>` finalizes a pending item with the chosen interval.
    ItemInterval(CheckInterval),
    /// `int:<h>` updates the user's global interval from `/settings`.
    UserInterval(CheckInterval),
    /// `unsub|<url>` removes an item from tracking.
    Unsubscribe(String),
}

/// Parse callback data into an action. Unknown data yields `None`.
#[must_use]
pub fn parse_callback(data: &str) -> Option<CallbackAction> {
    if data == "confirm:yes" {
        return Some(CallbackAction::ConfirmAdd);
    }
    if data == "confirm:no" {
        return Some(CallbackAction::CancelAdd);
    }
    // "int:" is a prefix of "interval:", so the longer one goes first.
    if let Some(rest) = data.strip_prefix("interval:") {
        return parse_hours(rest).map(CallbackAction::ItemInterval);
    }
    if let Some(rest) = data.strip_prefix("int:") {
        return parse_hours(rest).map(CallbackAction::UserInterval);
    }
    if let Some(url) = data.strip_prefix("unsub|") {
        return Some(CallbackAction::Unsubscribe(url.to_string()));
    }
    None
}

fn parse_hours(raw: &str) -> Option<CheckInterval> {
    let hours: i64 = raw.parse().ok()?;
    CheckInterval::try_from_hours(hours).ok()
}
