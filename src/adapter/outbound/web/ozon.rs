//! Price extraction from Ozon product pages.

use lazy_static::lazy_static;
use scraper::Selector;

use super::extract;
use crate::port::outbound::fetcher::FetchedPrice;

lazy_static! {
    // Selectors drift with marketplace redesigns; keep the list short and
    // ordered by how often each currently matches.
    static ref PRICE_SELECTORS: Vec<Selector> = [
        r#"[data-auto="mainPrice"]"#,
        ".ui-price",
        r#"[itemprop="price"]"#,
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect();
}

/// Extract price and title from an Ozon product page.
pub fn extract(html: &str) -> FetchedPrice {
    let price = extract::price_from_structured_data(html)
        .or_else(|| extract::price_from_selectors(html, &PRICE_SELECTORS));

    FetchedPrice {
        price,
        title: extract::page_title(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn structured_data_takes_precedence() {
        let html = r#"<html><head>
            <title>Widget</title>
            <script type="application/ld+json">{"offers":{"price":"1200"}}</script>
        </head><body>
            <div data-auto="mainPrice">9 999 ₽</div>
        </body></html>"#;

        let fetched = extract(html);
        assert_eq!(fetched.price, Some(dec!(1200)));
        assert_eq!(fetched.title.as_deref(), Some("Widget"));
    }

    #[test]
    fn falls_back_to_selectors() {
        let html = r#"<html><head><title>Widget</title></head>
            <body><span class="ui-price">4 590 ₽</span></body></html>"#;

        assert_eq!(extract(html).price, Some(dec!(4590)));
    }

    #[test]
    fn unparseable_page_yields_empty_price() {
        let fetched = extract("<html><head><title>Widget</title></head><body>нет цены</body></html>");
        assert_eq!(fetched.price, None);
        assert_eq!(fetched.title.as_deref(), Some("Widget"));
    }
}
