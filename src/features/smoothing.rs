//! Moving-average smoothing and high-frequency detection.

use ndarray::Array1;

/// Default number of parts the series length is divided into when deriving a
/// smoothing window.
pub const DEFAULT_ROLLING_PARTS: usize = 200;

/// Smoothing window derived from the series length: `len / rolling_parts`,
/// never smaller than 2.
pub fn default_window(len: usize, rolling_parts: usize) -> usize {
    (len / rolling_parts.max(1)).max(2)
}

/// Gap-free centered smoothing of `series`.
///
/// Averages a trailing mean over the `window` values strictly before each
/// position with a leading mean over the `window` values starting at it.
/// Near the boundaries, where one side lacks enough history, the other
/// side's value is used alone; positions where both sides are undefined stay
/// NaN (only possible when `window > len`).
pub fn moving_average(series: &Array1<f64>, window: usize) -> Array1<f64> {
    assert!(window >= 1, "window must be at least 1");

    let n = series.len();
    let mut prefix = vec![0.0; n + 1];
    for (i, &v) in series.iter().enumerate() {
        prefix[i + 1] = prefix[i] + v;
    }
    let mean_range = |a: usize, b: usize| (prefix[b] - prefix[a]) / (b - a) as f64;

    Array1::from_shape_fn(n, |t| {
        let trailing = (t >= window).then(|| mean_range(t - window, t));
        let leading = (t + window <= n).then(|| mean_range(t, t + window));
        match (trailing, leading) {
            (Some(a), Some(b)) => 0.5 * (a + b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => f64::NAN,
        }
    })
}

/// Decide whether `series` carries enough high-frequency content that
/// smoothing it would change its character.
///
/// Compares the standard deviation of the raw series against that of its
/// trailing rolling mean with window `len / rolling_parts` and returns true
/// when the relative change exceeds `threshold`. Degenerate inputs (fewer
/// than two points, zero deviation, window longer than the series) are not
/// high frequency.
pub fn is_high_frequency(series: &Array1<f64>, threshold: f64, rolling_parts: usize) -> bool {
    let n = series.len();
    if n < 2 {
        return false;
    }

    let raw: Vec<f64> = series.iter().copied().collect();
    let orig_std = sample_std(&raw);
    if orig_std == 0.0 {
        return false;
    }

    let window = default_window(n, rolling_parts);
    if window > n {
        return false;
    }
    let smoothed: Vec<f64> = (window - 1..n)
        .map(|t| raw[t + 1 - window..=t].iter().sum::<f64>() / window as f64)
        .collect();
    let ma_std = sample_std(&smoothed);

    (ma_std - orig_std).abs() / orig_std > threshold
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
