//! HTTP server module.
//!
//! An axum server exposing the upload form and the report endpoint on top
//! of the service layer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Multipart parsing, upload rejections                  │
//! │  - HTML / JSON responses, compression, tracing           │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │  spawn_blocking
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                               │
//! │  - Forecast, category counts, charts, report page        │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Ingestion (ingest/) and models (algorithms/)            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
