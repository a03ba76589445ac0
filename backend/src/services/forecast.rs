//! Train a model on the daily series and project it forward.

use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use crate::algorithms::{
    build_model, evaluate, train_test_split, ForecastError, ForecastResult, ModelParams,
};
use crate::models::{DailySeries, ForecastPoint, ModelMetrics};

/// Outcome of fitting one model to one series.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRun {
    pub model: &'static str,
    pub metrics: ModelMetrics,
    pub forecast: Vec<ForecastPoint>,
    pub train_size: usize,
    pub test_size: usize,
}

/// The `horizon` days immediately after the last observed day, as
/// `(date, day offset)` pairs. Empty for an empty series.
pub fn future_days(series: &DailySeries, horizon: u32) -> Vec<(NaiveDate, i64)> {
    let (Some(last_date), Some(last_day)) = (series.last_date(), series.last_day()) else {
        return Vec::new();
    };
    (1..=i64::from(horizon))
        .map(|k| (last_date + Duration::days(k), last_day + k))
        .collect()
}

/// Split, fit, score and forecast.
///
/// The model is trained on the training partition only; the held-out
/// partition produces the metrics, and the same model predicts the
/// `horizon` future days.
pub fn fit_and_forecast(
    series: &DailySeries,
    params: &ModelParams,
    test_fraction: f64,
    horizon: u32,
) -> ForecastResult<ModelRun> {
    let x = series.features();
    let y = series.targets();

    let split = train_test_split(series.len(), test_fraction, params.seed)?;
    let (x_train, y_train) = (split.take_train(&x), split.take_train(&y));
    let (x_test, y_test) = (split.take_test(&x), split.take_test(&y));
    debug!(
        "Split {} daily counts into {} train / {} test",
        series.len(),
        x_train.len(),
        x_test.len()
    );

    let mut model = build_model(params);
    model.fit(&x_train, &y_train)?;

    let y_pred = model.predict(&x_test)?;
    let metrics = evaluate(&y_test, &y_pred);
    info!(
        "Model {} scored MAE={:.3} MSE={:.3} R2={:.3}",
        model.name(),
        metrics.mae,
        metrics.mse,
        metrics.r2
    );

    let future = future_days(series, horizon);
    let future_x: Vec<f64> = future.iter().map(|(_, day)| *day as f64).collect();
    let predictions = model.predict(&future_x)?;
    if predictions.len() != future.len() {
        return Err(ForecastError::InvalidParameter(format!(
            "model returned {} predictions for {} future days",
            predictions.len(),
            future.len()
        )));
    }

    let forecast = future
        .into_iter()
        .zip(predictions)
        .map(|((date, day), predicted)| ForecastPoint {
            date,
            day,
            predicted,
        })
        .collect();

    Ok(ModelRun {
        model: model.name(),
        metrics,
        forecast,
        train_size: split.train.len(),
        test_size: split.test.len(),
    })
}
