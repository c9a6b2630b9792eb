//! Supported marketplaces and product-link recognition.

use url::Url;

/// Marketplaces the bot can track prices on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marketplace {
    Ozon,
    Wildberries,
}

impl Marketplace {
    /// Return a stable string identifier, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ozon => "ozon",
            Self::Wildberries => "wildberries",
        }
    }

    /// Root domain of this marketplace.
    #[must_use]
    pub const fn domain(self) -> &'static str {
        match self {
            Self::Ozon => "ozon.ru",
            Self::Wildberries => "wildberries.ru",
        }
    }

    /// Detect the marketplace a product URL belongs to.
    ///
    /// Matches on the URL host, so a supported domain appearing in the
    /// query string of some other site does not count.
    #[must_use]
    pub fn detect(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        [Self::Ozon, Self::Wildberries]
            .into_iter()
            .find(|mp| host_matches(host, mp.domain()))
    }
}

impl std::fmt::Display for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

/// Extract the first supported product link from a chat message.
///
/// A bare `ozon.ru/...` without a scheme gets `https://` prepended before
/// validation. Returns the marketplace together with the normalized URL
/// string, or `None` if no token in the message is a supported link.
#[must_use]
pub fn extract_supported_url(text: &str) -> Option<(Marketplace, String)> {
    for token in text.split_whitespace() {
        if !token.contains("ozon.ru") && !token.contains("wildberries.ru") {
            continue;
        }
        let candidate = if token.starts_with("http://") || token.starts_with("https://") {
            token.to_string()
        } else {
            format!("https://{token}")
        };
        if let Some(marketplace) = Marketplace::detect(&candidate) {
            return Some((marketplace, candidate));
        }
    }
    None
}
