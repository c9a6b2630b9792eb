//! Outbound adapters: page fetching, persistence, charts, alert delivery.

pub mod chart;
pub mod sqlite;
pub mod telegram;
pub mod web;
