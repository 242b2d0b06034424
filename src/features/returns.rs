//! Log-return conversion.

use ndarray::Array1;

/// Convert a price series into log returns.
///
/// The value at position `t` is `ln(series[t] / series[t - 1])`. Position 0
/// has no predecessor and is filled with 0 so the output length matches the
/// input. Inputs must be strictly positive; a non-positive value yields NaN
/// or an infinity at that position, which is surfaced as-is rather than
/// masked.
pub fn log_returns(series: &Array1<f64>) -> Array1<f64> {
    let mut out = Array1::zeros(series.len());
    for t in 1..series.len() {
        out[t] = (series[t] / series[t - 1]).ln();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_first_position_is_zero() {
        let series = array![100.0, 101.0, 99.5, 102.0];
        let returns = log_returns(&series);

        assert_eq!(returns.len(), series.len());
        assert_eq!(returns[0], 0.0);
    }

    #[test]
    fn test_constant_series_is_all_zero() {
        let series = Array1::from_elem(16, 42.0);
        let returns = log_returns(&series);

        assert!(returns.iter().all(|&r| r == 0.0));
    }

    #[test]
    fn test_known_ratio() {
        let series = array![1.0, std::f64::consts::E];
        let returns = log_returns(&series);

        assert!((returns[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_series() {
        let series = Array1::zeros(0);
        assert_eq!(log_returns(&series).len(), 0);
    }

    #[test]
    fn test_non_positive_input_surfaces_nan() {
        let series = array![1.0, -1.0, 1.0];
        let returns = log_returns(&series);

        assert!(returns[1].is_nan());
    }
}
