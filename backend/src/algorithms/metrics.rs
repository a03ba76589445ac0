use crate::models::ModelMetrics;

/// Score predictions against held-out targets.
///
/// R² is `1 - SS_res / SS_tot`. A constant target (`SS_tot == 0`) scores 1.0
/// when predicted exactly and 0.0 otherwise; fewer than two samples give NaN.
pub fn evaluate(y_true: &[f64], y_pred: &[f64]) -> ModelMetrics {
    debug_assert_eq!(y_true.len(), y_pred.len());
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return ModelMetrics {
            mae: f64::NAN,
            mse: f64::NAN,
            r2: f64::NAN,
        };
    }

    let nf = n as f64;
    let pairs = || y_true.iter().zip(y_pred).take(n);

    let mae = pairs().map(|(t, p)| (t - p).abs()).sum::<f64>() / nf;
    let ss_res: f64 = pairs().map(|(t, p)| (t - p) * (t - p)).sum();
    let mse = ss_res / nf;

    let r2 = if n < 2 {
        f64::NAN
    } else {
        let mean = y_true[..n].iter().sum::<f64>() / nf;
        let ss_tot: f64 = y_true[..n].iter().map(|t| (t - mean) * (t - mean)).sum();
        if ss_tot == 0.0 {
            if ss_res == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        }
    };

    ModelMetrics { mae, mse, r2 }
}
