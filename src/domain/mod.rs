//! Marketplace-agnostic tracking domain logic.

pub mod error;

mod change;
mod history;
mod interval;
mod item;
mod marketplace;

pub use change::{evaluate, Direction, PriceChange, UNSUBSCRIBE_DROP_THRESHOLD};
pub use history::{PriceHistory, PricePoint, HISTORY_CAP};
pub use interval::{is_due, CheckInterval};
pub use item::TrackedItem;
pub use marketplace::{extract_supported_url, Marketplace};
