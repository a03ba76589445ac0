//! Regression models mapping a day offset to an incident count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::forest::RandomForestRegressor;
use super::{ForecastError, ForecastResult};

/// A single-feature regression model.
pub trait Regressor: Send {
    /// Fit the model to `(x, y)` pairs. Both slices have the same length.
    fn fit(&mut self, x: &[f64], y: &[f64]) -> ForecastResult<()>;

    /// Predict one value per input. Calling before `fit` is an error.
    fn predict(&self, x: &[f64]) -> ForecastResult<Vec<f64>>;

    fn name(&self) -> &'static str;
}

/// Available model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    RandomForest,
    Linear,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "random_forest",
            ModelKind::Linear => "linear",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random_forest" | "forest" | "rf" => Ok(ModelKind::RandomForest),
            "linear" | "ols" => Ok(ModelKind::Linear),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown model '{}'. Use random_forest or linear.",
                other
            ))),
        }
    }
}

/// Hyperparameters shared by the model families.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub kind: ModelKind,
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub seed: u64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            kind: ModelKind::RandomForest,
            n_estimators: 100,
            max_depth: None,
            seed: 42,
        }
    }
}

/// Build an unfitted model for the given parameters.
pub fn build_model(params: &ModelParams) -> Box<dyn Regressor> {
    match params.kind {
        ModelKind::RandomForest => Box::new(RandomForestRegressor::new(
            params.n_estimators,
            params.max_depth,
            params.seed,
        )),
        ModelKind::Linear => Box::new(LinearRegression::default()),
    }
}

pub(crate) fn check_training_data(x: &[f64], y: &[f64]) -> ForecastResult<()> {
    if x.len() != y.len() {
        return Err(ForecastError::InvalidParameter(format!(
            "feature and target lengths differ ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        return Err(ForecastError::InsufficientData {
            required: 1,
            available: 0,
        });
    }
    Ok(())
}

/// Ordinary least squares fit of `y = intercept + slope * x`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearRegression {
    coefficients: Option<(f64, f64)>,
}

impl LinearRegression {
    /// `(intercept, slope)` once fitted.
    pub fn coefficients(&self) -> Option<(f64, f64)> {
        self.coefficients
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: &[f64], y: &[f64]) -> ForecastResult<()> {
        check_training_data(x, y)?;

        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let (sxy, sxx) = x
            .iter()
            .zip(y)
            .fold((0.0, 0.0), |(sxy, sxx), (xi, yi)| {
                let dx = xi - mean_x;
                (sxy + dx * (yi - mean_y), sxx + dx * dx)
            });

        // A constant feature carries no slope information.
        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        self.coefficients = Some((mean_y - slope * mean_x, slope));
        Ok(())
    }

    fn predict(&self, x: &[f64]) -> ForecastResult<Vec<f64>> {
        let (intercept, slope) = self.coefficients.ok_or(ForecastError::NotFitted)?;
        Ok(x.iter().map(|xi| intercept + slope * xi).collect())
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}
