//! Forecast and report types produced for a single upload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DailySeries;

/// Predicted incident count for one future day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub day: i64,
    pub predicted: f64,
}

/// Hold-out scores of the fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Mean absolute error
    pub mae: f64,
    /// Mean squared error
    pub mse: f64,
    /// Coefficient of determination (NaN with fewer than two test samples)
    pub r2: f64,
}

/// Frequency table of one categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// Source column header
    pub column: String,
    /// Chart title
    pub title: String,
    /// Label for the category axis
    pub axis_label: String,
    /// `(value, count)` pairs, most frequent first
    pub counts: Vec<(String, u32)>,
}

impl CategoryCounts {
    pub fn max_count(&self) -> u32 {
        self.counts.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }
}

/// Everything the report page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub series: DailySeries,
    pub metrics: ModelMetrics,
    pub forecast: Vec<ForecastPoint>,
    pub categories: Vec<CategoryCounts>,
    pub train_size: usize,
    pub test_size: usize,
    /// Rows discarded because their date did not parse
    pub dropped_rows: usize,
}
