//! Reversible global standardization.

use ndarray::{Array, ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

use crate::{Result, TimeDiffusionError};

/// Lower bound on the stored standard deviation. A constant input would
/// otherwise produce a zero scale and NaN transforms; with the floor,
/// `transform` and `inverse_transform` stay exact inverses for every fitted
/// scaler.
const MIN_STD: f64 = 1e-8;

/// Standard scaler with a single global mean and standard deviation.
///
/// Both statistics are computed over every element of the fitted array, no
/// matter its shape. Lag and horizon windows cut from one return series then
/// share one scale and stay directly comparable; per-feature scaling is
/// deliberately not offered.
///
/// A scaler only exists in fitted form: [`StandardScaler::fit`] is the sole
/// constructor, so transforming with unfitted state is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: f64,
    std: f64,
}

impl StandardScaler {
    /// Fit on every element of `data`, regardless of rank.
    pub fn fit<S, D>(data: &ArrayBase<S, D>) -> Result<Self>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        if data.is_empty() {
            return Err(TimeDiffusionError::EmptyInput(
                "cannot fit a scaler on an empty array",
            ));
        }
        let n = data.len() as f64;
        let mean = data.sum() / n;
        let variance = data.fold(0.0, |acc, &v| acc + (v - mean).powi(2)) / n;

        Ok(Self {
            mean,
            std: variance.sqrt().max(MIN_STD),
        })
    }

    /// Fit on `data` and transform it in one step.
    pub fn fit_transform<S, D>(data: &ArrayBase<S, D>) -> Result<(Array<f64, D>, Self)>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let scaler = Self::fit(data)?;
        Ok((scaler.transform(data), scaler))
    }

    /// Standardize `data`, broadcasting the two fitted scalars over any
    /// shape.
    pub fn transform<S, D>(&self, data: &ArrayBase<S, D>) -> Array<f64, D>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        data.mapv(|v| (v - self.mean) / self.std)
    }

    /// Undo [`StandardScaler::transform`].
    pub fn inverse_transform<S, D>(&self, data: &ArrayBase<S, D>) -> Array<f64, D>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        data.mapv(|v| v * self.std + self.mean)
    }

    /// Fitted global mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Fitted global standard deviation (floored, see module notes).
    pub fn std(&self) -> f64 {
        self.std
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2, Array3};

    #[test]
    fn test_fit_statistics() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let scaler = StandardScaler::fit(&data).unwrap();

        assert_abs_diff_eq!(scaler.mean(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(scaler.std(), 1.25f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let data = Array2::from_shape_fn((8, 5), |(i, j)| i as f64 * 0.7 - j as f64 * 1.3);
        let (transformed, scaler) = StandardScaler::fit_transform(&data).unwrap();
        let restored = scaler.inverse_transform(&transformed);

        for (a, b) in data.iter().zip(restored.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_transform_is_standardized() {
        let data = Array1::from_shape_fn(100, |i| 3.0 * i as f64 - 17.0);
        let (transformed, _) = StandardScaler::fit_transform(&data).unwrap();

        let mean = transformed.mean().unwrap();
        let std = (transformed.mapv(|v| (v - mean).powi(2)).mean().unwrap()).sqrt();
        assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(std, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_statistics_ignore_shape() {
        let values: Vec<f64> = (0..24).map(|i| i as f64 * 0.5).collect();
        let flat = Array1::from_vec(values.clone());
        let cube = Array3::from_shape_vec((2, 3, 4), values).unwrap();

        let a = StandardScaler::fit(&flat).unwrap();
        let b = StandardScaler::fit(&cube).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_constant_array_round_trip() {
        let data = Array3::from_elem((2, 3, 4), 7.0);
        let (transformed, scaler) = StandardScaler::fit_transform(&data).unwrap();

        assert!(transformed.iter().all(|&v| v == 0.0));
        let restored = scaler.inverse_transform(&transformed);
        assert!(restored.iter().all(|&v| (v - 7.0).abs() < 1e-9));
    }

    #[test]
    fn test_fit_on_empty_fails() {
        let data = Array2::<f64>::zeros((0, 3));
        assert!(StandardScaler::fit(&data).is_err());
    }
}
