//! Price extraction from Wildberries product pages.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use scraper::Selector;
use std::str::FromStr;

use super::extract;
use crate::port::outbound::fetcher::FetchedPrice;

lazy_static! {
    // WB embeds product state as JSON; salePriceU is in kopecks.
    static ref SALE_PRICE: Regex = Regex::new(r#""salePriceU":(\d+)"#).unwrap();
    static ref GOODS_NAME: Regex = Regex::new(r#""goodsName":"([^"]+)""#).unwrap();
    static ref PRICE_SELECTORS: Vec<Selector> = [
        ".price-block__final-price",
        r#"[data-auto="mainPrice"]"#,
        r#"[itemprop="price"]"#,
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect();
}

/// Extract price and title from a Wildberries product page.
pub fn extract(html: &str) -> FetchedPrice {
    let price = price_from_state(html)
        .or_else(|| extract::price_from_selectors(html, &PRICE_SELECTORS));

    let title = GOODS_NAME
        .captures(html)
        .map(|captures| captures[1].to_string())
        .or_else(|| extract::page_title(html));

    FetchedPrice { price, title }
}

fn price_from_state(html: &str) -> Option<Decimal> {
    let kopecks = SALE_PRICE.captures(html)?.get(1)?.as_str();
    let rubles = Decimal::from_str(kopecks).ok()? / dec!(100);
    (rubles > Decimal::ZERO).then_some(rubles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_price_is_in_kopecks() {
        let html = r#"<script>{"goodsName":"Кроссовки","salePriceU":459000}</script>"#;

        let fetched = extract(html);
        assert_eq!(fetched.price, Some(dec!(4590)));
        assert_eq!(fetched.title.as_deref(), Some("Кроссовки"));
    }

    #[test]
    fn falls_back_to_selectors_and_title_tag() {
        let html = r#"<html><head><title>Кроссовки</title></head>
            <body><ins class="price-block__final-price">4 590 ₽</ins></body></html>"#;

        let fetched = extract(html);
        assert_eq!(fetched.price, Some(dec!(4590)));
        assert_eq!(fetched.title.as_deref(), Some("Кроссовки"));
    }

    #[test]
    fn zero_state_price_is_ignored() {
        let html = r#"<script>{"salePriceU":0}</script>"#;
        assert_eq!(extract(html).price, None);
    }
}
