//! Pricewatch - Telegram bot that tracks marketplace product prices.
//!
//! A user submits an Ozon or Wildberries product link; the bot fetches the
//! current price, asks for confirmation, then periodically re-checks the
//! price and sends an alert when it changes (with a history chart once
//! enough samples exist, and an unsubscribe shortcut on large drops).
//!
//! # Modules
//!
//! - [`config`] - Configuration from an optional TOML file plus environment
//! - [`domain`] - Tracking logic: marketplaces, history, intervals, change
//!   detection
//! - [`error`] - Error types for the crate
//! - [`port`] - Traits decoupling the core from fetching, storage and
//!   delivery
//! - [`adapter`] - Telegram surface, HTTP page fetcher, SQLite store, chart
//!   rendering
//! - [`app`] - Application wiring and the periodic scan loop

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
