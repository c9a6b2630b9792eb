//! Outbound ports: price fetching, persistence, notification delivery.

pub mod fetcher;
pub mod notifier;
pub mod store;

pub use fetcher::{FetchedPrice, PriceFetcher};
pub use notifier::{ChangeNotifier, LogNotifier, NullNotifier, PriceAlert};
pub use store::TrackingStore;
