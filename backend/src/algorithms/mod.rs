//! Model training and evaluation for the daily incident series.
//!
//! - [`split`]: seeded train/test partitioning
//! - [`regression`]: the [`Regressor`] trait and the linear model
//! - [`forest`]: the random forest regressor (default model)
//! - [`metrics`]: MAE, MSE and R² on held-out rows

pub mod forest;
pub mod metrics;
pub mod regression;
pub mod split;

pub use forest::{RandomForestRegressor, RegressionTree};
pub use metrics::evaluate;
pub use regression::{build_model, LinearRegression, ModelKind, ModelParams, Regressor};
pub use split::{train_test_split, Split};

use thiserror::Error;

/// Result type for model operations
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Failures while training or applying a model.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Not enough daily observations to train a model: need at least {required}, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid model parameter: {0}")]
    InvalidParameter(String),

    #[error("Model used before it was fitted")]
    NotFitted,
}
