//! Price change detection.
//!
//! Compares a freshly fetched price against the stored one and decides
//! whether, and with what attachments, the user should be notified.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::history::PriceHistory;

/// Minimum drop below the previous price that makes the notification carry
/// an unsubscribe action (a large drop is the moment users act on).
pub const UNSUBSCRIBE_DROP_THRESHOLD: Decimal = dec!(50);

/// Direction of a price movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Arrow glyph used in notification text.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
        }
    }
}

/// A detected price change and the notification decisions derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceChange {
    pub direction: Direction,
    /// Absolute difference between the old and new price.
    pub delta: Decimal,
    pub previous: Decimal,
    pub current: Decimal,
    /// Attach an unsubscribe action (drop greater than the threshold).
    pub offer_unsubscribe: bool,
    /// Attach a history chart (enough samples to be meaningful).
    pub chartable: bool,
}

/// Compare prices and build the notification decision.
///
/// Returns `None` when the price did not move, or when there is no previous
/// price yet — the first observation establishes the baseline silently.
/// `history` is the item's history *after* the new observation was appended.
#[must_use]
pub fn evaluate(
    previous: Option<Decimal>,
    current: Decimal,
    history: &PriceHistory,
) -> Option<PriceChange> {
    let previous = previous?;
    if current == previous {
        return None;
    }

    let diff = current - previous;
    let direction = if diff < Decimal::ZERO {
        Direction::Down
    } else {
        Direction::Up
    };

    Some(PriceChange {
        direction,
        delta: diff.abs(),
        previous,
        current,
        offer_unsubscribe: previous - current > UNSUBSCRIBE_DROP_THRESHOLD,
        chartable: history.chartable(),
    })
}
