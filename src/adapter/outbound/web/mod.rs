//! Marketplace page fetching over HTTP.

pub mod client;

mod extract;
mod ozon;
mod wildberries;

pub use client::PageClient;

use tracing::warn;

use crate::domain::Marketplace;
use crate::port::outbound::fetcher::{FetchedPrice, PriceFetcher};

/// [`PriceFetcher`] implementation backed by [`PageClient`].
pub struct WebPriceFetcher {
    client: PageClient,
}

impl WebPriceFetcher {
    #[must_use]
    pub fn new(client: PageClient) -> Self {
        Self { client }
    }
}

impl PriceFetcher for WebPriceFetcher {
    async fn fetch(&self, marketplace: Marketplace, url: &str) -> FetchedPrice {
        let html = match self.client.open(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(marketplace = %marketplace, url, error = %e, "Page load failed");
                return FetchedPrice::empty();
            }
        };

        let fetched = match marketplace {
            Marketplace::Ozon => ozon::extract(&html),
            Marketplace::Wildberries => wildberries::extract(&html),
        };

        if fetched.price.is_none() {
            warn!(marketplace = %marketplace, url, "No extractable price on page");
        }

        fetched
    }
}
