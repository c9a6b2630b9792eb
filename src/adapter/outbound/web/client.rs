//! HTTP page client with proxy support and bounded page slots.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::config::FetcherConfig;
use crate::error::{Error, Result};

/// Retrieves marketplace pages over HTTP.
///
/// Each call to [`open`](Self::open) occupies one page slot for the duration
/// of the load; the slot is released when the guard drops, on every exit
/// path. This bounds concurrent load on the marketplaces the same way a
/// browser page pool would.
pub struct PageClient {
    http: reqwest::Client,
    pages: Arc<Semaphore>,
}

impl PageClient {
    /// Build a client from fetcher configuration.
    ///
    /// # Errors
    /// Returns an error if the proxy URL is malformed or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.load_timeout_secs))
            .user_agent(&config.user_agent);

        if let Some(server) = &config.proxy_server {
            let mut proxy = reqwest::Proxy::all(server)?;
            if let (Some(user), Some(password)) =
                (&config.proxy_username, &config.proxy_password)
            {
                proxy = proxy.basic_auth(user, password);
            }
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http: builder.build()?,
            pages: Arc::new(Semaphore::new(config.max_pages)),
        })
    }

    /// Load a page and return its HTML.
    ///
    /// # Errors
    /// Returns an error on timeout, connection failure, or a non-success
    /// HTTP status.
    pub async fn open(&self, url: &str) -> Result<String> {
        let _page = self
            .pages
            .acquire()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
