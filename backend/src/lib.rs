//! # Strike Forecast
//!
//! Wildlife-strike incident forecasting behind a single upload page.
//!
//! An uploaded spreadsheet of incident records is cleaned and aggregated to
//! daily counts, a regression model is trained on the day offsets, scored on a
//! held-out partition and used to forecast the next 30 days. The result is an
//! HTML report with the model statistics, an inline SVG forecast chart and bar
//! charts of the optional categorical columns.
//!
//! ## Architecture
//!
//! - [`models`]: incident table, daily series and report types
//! - [`ingest`]: spreadsheet decoding, date coercion, daily aggregation
//! - [`algorithms`]: train/test split, regressors, evaluation metrics
//! - [`services`]: forecasting, category counts, charts and page rendering
//! - [`config`]: TOML and environment configuration
//! - [`http`]: axum server (feature `http-server`)
//!
//! Every request is independent: nothing is persisted and no state is
//! shared between requests apart from the read-only configuration.

pub mod algorithms;
pub mod config;
pub mod ingest;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
