//! Bounded price-history log for a tracked item.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of samples kept per item; oldest entries are evicted first.
pub const HISTORY_CAP: usize = 180;

/// A single price observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation timestamp.
    #[serde(rename = "t")]
    pub at: DateTime<Utc>,
    /// Observed price in whole currency units.
    #[serde(rename = "p")]
    pub price: Decimal,
}

/// Append-only price log, capped at [`HISTORY_CAP`] entries.
///
/// Timestamps are kept non-decreasing: an observation stamped earlier than
/// the current head is clamped to the head's timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl PriceHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from stored points, enforcing the cap.
    #[must_use]
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        if points.len() > HISTORY_CAP {
            points.drain(..points.len() - HISTORY_CAP);
        }
        Self { points }
    }

    /// Append an observation, evicting the oldest entry beyond the cap.
    pub fn push(&mut self, at: DateTime<Utc>, price: Decimal) {
        let at = self.points.last().map_or(at, |last| at.max(last.at));
        self.points.push(PricePoint { at, price });
        if self.points.len() > HISTORY_CAP {
            self.points.drain(..self.points.len() - HISTORY_CAP);
        }
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether there are enough samples for a meaningful chart.
    #[must_use]
    pub fn chartable(&self) -> bool {
        self.points.len() >= 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn t0() -> DateTime<Utc> {
        "2026-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn push_appends_in_order() {
        let mut history = PriceHistory::new();
        history.push(t0(), dec!(1200));
        history.push(t0() + Duration::hours(6), dec!(1100));

        assert_eq!(history.len(), 2);
        assert_eq!(history.points()[0].price, dec!(1200));
        assert_eq!(history.points()[1].price, dec!(1100));
    }

    #[test]
    fn cap_evicts_oldest_first() {
        let mut history = PriceHistory::new();
        for i in 0..(HISTORY_CAP as i64 + 20) {
            history.push(t0() + Duration::hours(i), Decimal::from(i));
        }

        assert_eq!(history.len(), HISTORY_CAP);
        // Entries 0..20 were evicted.
        assert_eq!(history.points()[0].price, Decimal::from(20));
    }

    #[test]
    fn timestamps_stay_non_decreasing() {
        let mut history = PriceHistory::new();
        history.push(t0(), dec!(100));
        history.push(t0() - Duration::hours(1), dec!(200));

        let points = history.points();
        assert!(points[1].at >= points[0].at);
    }

    #[test]
    fn from_points_enforces_cap() {
        let points: Vec<PricePoint> = (0..(HISTORY_CAP as i64 + 5))
            .map(|i| PricePoint {
                at: t0() + Duration::hours(i),
                price: Decimal::from(i),
            })
            .collect();

        let history = PriceHistory::from_points(points);
        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.points()[0].price, Decimal::from(5));
    }

    #[test]
    fn chartable_needs_four_points() {
        let mut history = PriceHistory::new();
        for i in 0..3 {
            history.push(t0() + Duration::hours(i), dec!(500));
        }
        assert!(!history.chartable());

        history.push(t0() + Duration::hours(3), dec!(500));
        assert!(history.chartable());
    }

    #[test]
    fn point_serde_uses_short_keys() {
        let point = PricePoint {
            at: t0(),
            price: dec!(1200),
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"t\""));
        assert!(json.contains("\"p\""));

        let back: PricePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
