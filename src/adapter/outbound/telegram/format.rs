//! Message texts for bot replies and price alerts.

use rust_decimal::Decimal;

use crate::domain::{CheckInterval, TrackedItem};
use crate::port::outbound::notifier::PriceAlert;

pub const LINK_RECEIVED: &str = "🔍 Ссылку получил, обрабатываю…";
pub const UNSUPPORTED_SITE: &str = "Пока поддерживаются только Ozon и Wildberries.";
pub const FETCH_FAILED: &str =
    "Не удалось получить цену. Возможно блокировка или неверная ссылка.";
pub const NO_ITEMS: &str = "Нет отслеживаемых товаров.";
pub const CHOOSE_INTERVAL: &str = "⏱ Выбери интервал отслеживания:";
pub const CANCELLED: &str = "Ок, не отслеживаю.";
pub const PENDING_EXPIRED: &str = "Нечего подтверждать. Пришли ссылку ещё раз.";
pub const UNSUBSCRIBED: &str = "Отписка выполнена";

/// Prices are shown in whole currency units.
pub fn format_price(price: Decimal) -> String {
    price.round().to_string()
}

/// Price-change alert text.
pub fn format_alert(alert: &PriceAlert) -> String {
    let change = &alert.change;
    format!(
        "Изменение цены!\n{}\nБыло: {} ₽\nСтало: {} ₽ {} {} ₽\n{}",
        alert.title.as_deref().unwrap_or("Товар"),
        format_price(change.previous),
        format_price(change.current),
        change.direction.arrow(),
        format_price(change.delta),
        alert.url
    )
}

/// Confirmation card shown after a link was parsed.
pub fn format_confirmation(title: Option<&str>, price: Decimal) -> String {
    format!(
        "📦 {}\n💰 {} ₽\n\nДобавить в отслеживание?",
        title.unwrap_or("Товар"),
        format_price(price)
    )
}

pub fn format_added(interval: CheckInterval) -> String {
    format!(
        "✅ Товар добавлен\n⏱ Проверка каждые {} ч",
        interval.hours()
    )
}

pub fn format_interval_set(interval: CheckInterval) -> String {
    format!("Интервал: каждые {} часов", interval.hours())
}

pub fn format_settings(current: CheckInterval) -> String {
    format!("Текущий интервал: {} ч\nВыбери:", current.hours())
}

/// Short display title for list entries and unsubscribe buttons.
pub fn short_title(item: &TrackedItem) -> String {
    match &item.title {
        Some(title) => truncate(title, 40),
        None => truncate(&item.url, 50),
    }
}

pub fn format_list(items: &[TrackedItem]) -> String {
    let mut text = String::from("Твои товары:\n\n");
    for item in items {
        let price = item
            .last_price
            .map_or_else(|| "?".to_string(), format_price);
        text.push_str(&format!("• {} — {} ₽\n", short_title(item), price));
    }
    text
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}…")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{evaluate, PriceHistory};
    use chrono::{DateTime, Duration, Utc};
    use rust_decimal_macros::dec;

    fn alert(previous: Decimal, current: Decimal) -> PriceAlert {
        let start: DateTime<Utc> = "2026-06-01T00:00:00Z".parse().unwrap();
        let mut history = PriceHistory::new();
        history.push(start, previous);
        history.push(start + Duration::hours(6), current);

        PriceAlert {
            user_id: 1,
            url: "https://www.ozon.ru/product/widget-1/".into(),
            title: Some("Widget".into()),
            change: evaluate(Some(previous), current, &history).unwrap(),
            history: history.points().to_vec(),
        }
    }

    #[test]
    fn alert_text_shows_old_and_new_price() {
        let text = format_alert(&alert(dec!(1200), dec!(1100)));

        assert!(text.contains("Изменение цены!"));
        assert!(text.contains("Widget"));
        assert!(text.contains("Было: 1200 ₽"));
        assert!(text.contains("Стало: 1100 ₽ ↓ 100 ₽"));
        assert!(text.contains("https://www.ozon.ru/product/widget-1/"));
    }

    #[test]
    fn alert_text_rise_uses_up_arrow() {
        let text = format_alert(&alert(dec!(900), dec!(1000)));
        assert!(text.contains("Стало: 1000 ₽ ↑ 100 ₽"));
    }

    #[test]
    fn prices_are_rounded_to_whole_units() {
        assert_eq!(format_price(dec!(1199.49)), "1199");
        assert_eq!(format_price(dec!(1200)), "1200");
    }

    #[test]
    fn confirmation_shows_price() {
        let text = format_confirmation(Some("Widget"), dec!(1200));
        assert!(text.contains("Widget"));
        assert!(text.contains("1200 ₽"));
        assert!(text.contains("Добавить в отслеживание?"));
    }

    #[test]
    fn confirmation_without_title_has_placeholder() {
        let text = format_confirmation(None, dec!(500));
        assert!(text.contains("Товар"));
    }

    #[test]
    fn list_lines_truncate_long_titles() {
        let item = TrackedItem {
            user_id: 1,
            url: "https://www.ozon.ru/product/x/".into(),
            title: Some("Очень длинное название товара, которое не влезает в кнопку целиком".into()),
            last_price: Some(dec!(990)),
            last_check: None,
            history: PriceHistory::new(),
            last_notified: None,
        };

        let text = format_list(std::slice::from_ref(&item));
        assert!(text.starts_with("Твои товары:"));
        assert!(text.contains('…'));
        assert!(text.contains("990 ₽"));
    }

    #[test]
    fn truncate_is_unicode_safe() {
        assert_eq!(truncate("кроссовки", 4), "крос…");
        assert_eq!(truncate("short", 10), "short");
    }
}
