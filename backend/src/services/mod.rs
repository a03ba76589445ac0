//! Service layer: forecasting, category summaries, charts and the report page.
//!
//! Services sit between ingestion and the HTTP layer. Each function is
//! synchronous and request-scoped; the HTTP handlers run them on the blocking
//! thread pool.

pub mod categories;
pub mod charts;
pub mod forecast;
pub mod pipeline;
pub mod report;

pub use categories::{category_counts, collect_categories, CategoricalColumn, CATEGORICAL_COLUMNS};
pub use charts::{category_chart, forecast_chart, ChartError};
pub use forecast::{fit_and_forecast, future_days, ModelRun};
pub use pipeline::{build_report, render_charts, visualize, PipelineError, PipelineSettings};
pub use report::{render_page, stats_html, TABLEAU_EMBED, UPLOAD_PAGE};
