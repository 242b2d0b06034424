//! Lag / horizon window extraction.

use ndarray::{s, Array1, Array2};

use crate::{Result, TimeDiffusionError};

/// Cut a pair of aligned series into supervised sample windows.
///
/// For every start index `i` walking from `lags` to `len - horizon`
/// (inclusive) in steps of `stride`, the feature window covers
/// `x[i - lags..i]` and the target window covers `y[i..i + horizon]`, so a
/// sample never sees its own future. Windows are emitted oldest first.
///
/// # Arguments
/// * `x` - Feature series
/// * `y` - Target series, same length as `x`
/// * `lags` - Past values per feature window, at least 1
/// * `horizon` - Future values per target window, at least 1
/// * `stride` - Step between window start positions, at least 1
///
/// # Returns
/// Feature windows `[count, lags]` and target windows `[count, horizon]`.
/// Series too short for a single window produce empty arrays with the
/// requested trailing dimensions rather than an error.
pub fn build_windows(
    x: &Array1<f64>,
    y: &Array1<f64>,
    lags: usize,
    horizon: usize,
    stride: usize,
) -> Result<(Array2<f64>, Array2<f64>)> {
    if lags == 0 || horizon == 0 || stride == 0 {
        return Err(TimeDiffusionError::InvalidParameter(
            "lags, horizon and stride must all be at least 1".to_string(),
        ));
    }
    if x.len() != y.len() {
        return Err(TimeDiffusionError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }

    let n = x.len();
    let starts: Vec<usize> = if n >= lags + horizon {
        (lags..=n - horizon).step_by(stride).collect()
    } else {
        Vec::new()
    };

    let mut x_windows = Array2::zeros((starts.len(), lags));
    let mut y_windows = Array2::zeros((starts.len(), horizon));
    for (row, &i) in starts.iter().enumerate() {
        x_windows.row_mut(row).assign(&x.slice(s![i - lags..i]));
        y_windows.row_mut(row).assign(&y.slice(s![i..i + horizon]));
    }

    Ok((x_windows, y_windows))
}
