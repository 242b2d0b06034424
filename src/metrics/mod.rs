//! Prediction error measures.
//!
//! Every metric fully reduces arbitrary-rank tensors to one scalar through
//! pure arithmetic, so each is usable directly as a training loss.
//! Prediction and ground truth must share a shape; a mismatch panics, as
//! does elementwise ndarray arithmetic.

use ndarray::{ArrayBase, Data, Dimension, Zip};

/// Guard against division by zero in the percentage-error family.
pub const METRIC_EPS: f64 = 1e-9;

/// Mean absolute error.
pub fn mae<S1, S2, D>(pred: &ArrayBase<S1, D>, truth: &ArrayBase<S2, D>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    Zip::from(pred)
        .and(truth)
        .map_collect(|&p, &t| (p - t).abs())
        .mean()
        .unwrap_or(0.0)
}

/// Mean squared error.
pub fn mse<S1, S2, D>(pred: &ArrayBase<S1, D>, truth: &ArrayBase<S2, D>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    Zip::from(pred)
        .and(truth)
        .map_collect(|&p, &t| (p - t).powi(2))
        .mean()
        .unwrap_or(0.0)
}

/// Mean absolute percentage error.
pub fn mape<S1, S2, D>(pred: &ArrayBase<S1, D>, truth: &ArrayBase<S2, D>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    Zip::from(pred)
        .and(truth)
        .map_collect(|&p, &t| (p - t).abs() / (METRIC_EPS + t.abs()))
        .mean()
        .unwrap_or(0.0)
}

/// Weighted absolute percentage error: total absolute error relative to the
/// total absolute truth.
pub fn wape<S1, S2, D>(pred: &ArrayBase<S1, D>, truth: &ArrayBase<S2, D>) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    let abs_err = Zip::from(pred)
        .and(truth)
        .fold(0.0, |acc, &p, &t| acc + (p - t).abs());
    let abs_truth = truth.fold(0.0, |acc, &t| acc + t.abs());
    abs_err / (METRIC_EPS + abs_truth)
}

/// Weighted mean absolute percentage error with a caller-supplied weight
/// tensor.
///
/// `weights` must broadcast against the error tensor the way numpy-style
/// trailing-axis broadcasting works; an incompatible shape is a usage error.
pub fn wmape<S1, S2, S3, D, E>(
    pred: &ArrayBase<S1, D>,
    truth: &ArrayBase<S2, D>,
    weights: &ArrayBase<S3, E>,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    S3: Data<Elem = f64>,
    D: Dimension,
    E: Dimension,
{
    let abs_err = Zip::from(pred)
        .and(truth)
        .map_collect(|&p, &t| (p - t).abs());
    let weights = weights.broadcast(abs_err.raw_dim()).unwrap_or_else(|| {
        panic!(
            "weight shape {:?} does not broadcast against error shape {:?}",
            weights.shape(),
            abs_err.shape()
        )
    });
    let weighted = Zip::from(&abs_err)
        .and(&weights)
        .fold(0.0, |acc, &e, &w| acc + e * w);
    let abs_truth = truth.fold(0.0, |acc, &t| acc + t.abs());
    weighted / (METRIC_EPS + abs_truth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array3};

    #[test]
    fn test_all_metrics_vanish_on_exact_prediction() {
        let pred = array![[0.5, -1.0], [2.0, 3.5]];
        let weights = array![1.0, 2.0];

        assert_eq!(mae(&pred, &pred), 0.0);
        assert_eq!(mse(&pred, &pred), 0.0);
        assert_eq!(mape(&pred, &pred), 0.0);
        assert_eq!(wape(&pred, &pred), 0.0);
        assert_eq!(wmape(&pred, &pred, &weights), 0.0);
    }

    #[test]
    fn test_mae_and_mse_known_values() {
        let pred = array![1.0, 2.0, 3.0];
        let truth = array![2.0, 2.0, 5.0];

        assert_abs_diff_eq!(mae(&pred, &truth), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mse(&pred, &truth), 5.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mape_known_values() {
        let pred = array![1.1, 1.8];
        let truth = array![1.0, 2.0];

        // (0.1 / 1.0 + 0.2 / 2.0) / 2
        assert_abs_diff_eq!(mape(&pred, &truth), 0.1, epsilon = 1e-8);
    }

    #[test]
    fn test_wape_known_values() {
        let pred = array![1.0, 3.0];
        let truth = array![2.0, 2.0];

        // (1 + 1) / (2 + 2)
        assert_abs_diff_eq!(wape(&pred, &truth), 0.5, epsilon = 1e-8);
    }

    #[test]
    fn test_wmape_with_unit_weights_matches_wape() {
        let pred = array![[1.0, 3.0], [0.0, -2.0]];
        let truth = array![[2.0, 2.0], [1.0, -1.0]];
        let ones = Array1::from_elem(2, 1.0);

        assert_abs_diff_eq!(
            wmape(&pred, &truth, &ones),
            wape(&pred, &truth),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_wmape_weights_broadcast_over_trailing_axis() {
        let pred = array![[1.0, 1.0], [1.0, 1.0]];
        let truth = array![[0.0, 0.0], [0.0, 0.0]];
        let weights = array![1.0, 3.0];

        // Errors are all 1; weighted sum = 2 * (1 + 3) = 8, truth sum = 0.
        let value = wmape(&pred, &truth, &weights);
        assert_abs_diff_eq!(value, 8.0 / METRIC_EPS, epsilon = 1e3);
    }

    #[test]
    fn test_metrics_reduce_any_rank() {
        let pred = Array3::from_elem((2, 3, 4), 2.0);
        let truth = Array3::from_elem((2, 3, 4), 1.0);

        assert_abs_diff_eq!(mae(&pred, &truth), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mse(&pred, &truth), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wape(&pred, &truth), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_division_guard_keeps_zero_truth_finite() {
        let pred = array![1.0];
        let truth = array![0.0];

        assert!(mape(&pred, &truth).is_finite());
        assert!(wape(&pred, &truth).is_finite());
    }

    #[test]
    #[should_panic(expected = "does not broadcast")]
    fn test_wmape_incompatible_weights_panic() {
        let pred = array![[1.0, 2.0], [3.0, 4.0]];
        let weights = array![1.0, 2.0, 3.0];
        wmape(&pred, &pred, &weights);
    }
}
