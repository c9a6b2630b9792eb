//! Price-history chart rendering.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::PricePoint;
use crate::error::{Error, Result};

const CHART_SIZE: (u32, u32) = (840, 420);

/// Render the price history as a PNG line chart at `path`.
///
/// Drawn without text labels so rendering does not depend on system fonts.
///
/// # Errors
/// Returns an error for fewer than two points or on backend failures.
pub fn render_history_chart(points: &[PricePoint], path: &Path) -> Result<()> {
    if points.len() < 2 {
        return Err(Error::Chart(format!(
            "need at least two points, got {}",
            points.len()
        )));
    }

    let times: Vec<DateTime<Utc>> = points.iter().map(|point| point.at).collect();
    let prices: Vec<f64> = points
        .iter()
        .map(|point| point.price.to_f64().unwrap_or(0.0))
        .collect();

    let t_from = times[0];
    let mut t_to = times[times.len() - 1];
    if t_to == t_from {
        t_to = t_from + Duration::minutes(1);
    }

    let lo = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((hi - lo) * 0.1).max(1.0);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .build_cartesian_2d(t_from..t_to, (lo - pad)..(hi + pad))
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(0)
        .y_labels(0)
        .draw()
        .map_err(chart_err)?;

    let series = times.iter().copied().zip(prices.iter().copied());
    chart
        .draw_series(LineSeries::new(series.clone(), &BLUE))
        .map_err(chart_err)?;
    chart
        .draw_series(series.map(|(t, p)| Circle::new((t, p), 3, BLUE.filled())))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

fn chart_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Chart(e.to_string())
}
