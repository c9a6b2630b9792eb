//! Shared HTML price-extraction helpers.
//!
//! Marketplace markup changes without notice, so extraction is a stack of
//! cheap heuristics: an embedded structured product object first, then a
//! scan of known price-bearing selectors.

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use scraper::{Html, Selector};
use std::str::FromStr;

/// Numbers at or below this are stray digits (ratings, counters), not prices.
pub const PRICE_SANITY_FLOOR: Decimal = dec!(100);

lazy_static! {
    static ref LD_JSON: Selector =
        Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    static ref TITLE: Selector = Selector::parse("title").unwrap();
}

/// Strategy 1: price from an embedded `application/ld+json` product object
/// (`offers.price`).
pub fn price_from_structured_data(html: &str) -> Option<Decimal> {
    let document = Html::parse_document(html);
    for script in document.select(&LD_JSON) {
        let text: String = script.text().collect();
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
            continue;
        };
        if let Some(price) = value
            .get("offers")
            .and_then(|offers| offers.get("price"))
            .and_then(json_price)
        {
            return Some(price);
        }
    }
    None
}

fn json_price(value: &serde_json::Value) -> Option<Decimal> {
    let price = match value {
        serde_json::Value::String(s) => Decimal::from_str(s).ok()?,
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
        _ => return None,
    };
    (price > Decimal::ZERO).then_some(price)
}

/// Strategy 2: scan known price-bearing selectors for the first numeric
/// value above the sanity floor.
pub fn price_from_selectors(html: &str, selectors: &[Selector]) -> Option<Decimal> {
    let document = Html::parse_document(html);
    for selector in selectors {
        for element in document.select(selector) {
            let text: String = element.text().collect();
            let digits = digits_only(&text);
            if digits.is_empty() {
                continue;
            }
            if let Ok(price) = Decimal::from_str(&digits) {
                if price > PRICE_SANITY_FLOOR {
                    return Some(price);
                }
            }
        }
    }
    None
}

/// The document's `<title>` text, trimmed; `None` when empty or absent.
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let title: String = document.select(&TITLE).next()?.text().collect();
    let trimmed = title.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Structured data
    // -------------------------------------------------------------------------

    #[test]
    fn structured_data_price() {
        let html = r#"<html><head>
            <script type="application/ld+json">
            {"@type":"Product","name":"Widget","offers":{"price":"1299","priceCurrency":"RUB"}}
            </script>
        </head><body></body></html>"#;

        assert_eq!(price_from_structured_data(html), Some(dec!(1299)));
    }

    #[test]
    fn structured_data_numeric_price() {
        let html = r#"<script type="application/ld+json">{"offers":{"price":459.90}}</script>"#;
        assert_eq!(price_from_structured_data(html), Some(dec!(459.90)));
    }

    #[test]
    fn structured_data_zero_price_is_ignored() {
        let html = r#"<script type="application/ld+json">{"offers":{"price":0}}</script>"#;
        assert_eq!(price_from_structured_data(html), None);
    }

    #[test]
    fn broken_json_is_skipped() {
        let html = r#"<script type="application/ld+json">{broken</script>"#;
        assert_eq!(price_from_structured_data(html), None);
    }

    // -------------------------------------------------------------------------
    // Selector scan
    // -------------------------------------------------------------------------

    fn selectors() -> Vec<Selector> {
        vec![Selector::parse("[data-auto=\"mainPrice\"]").unwrap()]
    }

    #[test]
    fn selector_scan_strips_markup_noise() {
        let html = r#"<div data-auto="mainPrice"><span>12&nbsp;499 ₽</span></div>"#;
        assert_eq!(price_from_selectors(html, &selectors()), Some(dec!(12499)));
    }

    #[test]
    fn selector_scan_rejects_stray_digits() {
        // A rating-like value below the floor must not be taken for a price.
        let html = r#"<div data-auto="mainPrice">47</div>"#;
        assert_eq!(price_from_selectors(html, &selectors()), None);
    }

    #[test]
    fn selector_scan_skips_empty_elements() {
        let html = r#"<div data-auto="mainPrice"></div><div data-auto="mainPrice">5 690 ₽</div>"#;
        assert_eq!(price_from_selectors(html, &selectors()), Some(dec!(5690)));
    }

    // -------------------------------------------------------------------------
    // Title
    // -------------------------------------------------------------------------

    #[test]
    fn title_is_trimmed() {
        let html = "<html><head><title>  Widget купить в интернет-магазине  </title></head></html>";
        assert_eq!(
            page_title(html).as_deref(),
            Some("Widget купить в интернет-магазине")
        );
    }

    #[test]
    fn empty_title_is_none() {
        assert_eq!(page_title("<html><head><title>   </title></head></html>"), None);
        assert_eq!(page_title("<html></html>"), None);
    }
}
