//! Upload to report page, end to end.

use thiserror::Error;
use tracing::info;

use super::categories::collect_categories;
use super::charts::{category_chart, forecast_chart, ChartError};
use super::forecast::fit_and_forecast;
use super::report::render_page;
use crate::algorithms::{ForecastError, ModelParams};
use crate::config::AppConfig;
use crate::ingest::{self, daily_counts, IngestError};
use crate::models::ForecastReport;

/// Any failure between receiving the bytes and producing the page.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// The subset of [`AppConfig`] a single run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub date_column: String,
    pub model: ModelParams,
    pub test_fraction: f64,
    pub horizon_days: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for PipelineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            date_column: config.ingest.date_column.clone(),
            model: config.model_params(),
            test_fraction: config.forecast.test_fraction,
            horizon_days: config.forecast.horizon_days,
        }
    }
}

/// Parse, clean, aggregate, train and forecast.
pub fn build_report(
    file_name: &str,
    bytes: &[u8],
    settings: &PipelineSettings,
) -> Result<ForecastReport, PipelineError> {
    let cleaned = ingest::load(file_name, bytes, &settings.date_column)?;
    let series = daily_counts(&cleaned.dates);
    let categories = collect_categories(&cleaned);

    let run = fit_and_forecast(
        &series,
        &settings.model,
        settings.test_fraction,
        settings.horizon_days,
    )?;

    Ok(ForecastReport {
        series,
        metrics: run.metrics,
        forecast: run.forecast,
        categories,
        train_size: run.train_size,
        test_size: run.test_size,
        dropped_rows: cleaned.dropped,
    })
}

/// Draw the forecast chart followed by one bar chart per category table.
pub fn render_charts(report: &ForecastReport) -> Result<Vec<String>, ChartError> {
    let mut charts = Vec::with_capacity(1 + report.categories.len());
    charts.push(forecast_chart(&report.forecast)?);
    for counts in &report.categories {
        charts.push(category_chart(counts)?);
    }
    Ok(charts)
}

/// Produce the full HTML report for an uploaded file.
pub fn visualize(
    file_name: &str,
    bytes: &[u8],
    settings: &PipelineSettings,
) -> Result<String, PipelineError> {
    let report = build_report(file_name, bytes, settings)?;
    let charts = render_charts(&report)?;
    info!(
        "Rendered report for '{}': {} daily counts, {} charts",
        file_name,
        report.series.len(),
        charts.len()
    );
    Ok(render_page(&report, &charts))
}
