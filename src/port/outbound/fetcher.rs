//! Price fetching port.

use std::future::Future;

use rust_decimal::Decimal;

use crate::domain::Marketplace;

/// What a page fetch produced.
///
/// Fetching is soft-fail: timeouts, blocked pages and markup the extractors
/// cannot make sense of all collapse into an empty outcome. Callers treat a
/// missing price as "skip and retry on the next due cycle".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPrice {
    pub price: Option<Decimal>,
    pub title: Option<String>,
}

impl FetchedPrice {
    /// Outcome of a failed or unparseable fetch.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Retrieves the current price and title for a product URL.
pub trait PriceFetcher: Send + Sync {
    /// Fetch the page and extract a price. Never fails; see [`FetchedPrice`].
    fn fetch(
        &self,
        marketplace: Marketplace,
        url: &str,
    ) -> impl Future<Output = FetchedPrice> + Send;
}
