//! In-memory tensor dataset and sequential batching.

use ndarray::{s, Array2};

use crate::{Result, TimeDiffusionError};

/// Paired feature / target tensors held in memory as single-precision
/// arrays, ready for a training loop.
#[derive(Debug, Clone)]
pub struct TensorDataset {
    /// Feature windows [samples, lags]
    pub features: Array2<f32>,
    /// Target windows [samples, horizon]
    pub targets: Array2<f32>,
}

impl TensorDataset {
    /// Build a dataset from double-precision sample arrays.
    pub fn new(features: Array2<f64>, targets: Array2<f64>) -> Result<Self> {
        if features.nrows() != targets.nrows() {
            return Err(TimeDiffusionError::LengthMismatch {
                left: features.nrows(),
                right: targets.nrows(),
            });
        }
        Ok(Self {
            features: features.mapv(|v| v as f32),
            targets: targets.mapv(|v| v as f32),
        })
    }

    /// Get the number of samples.
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sequential, non-shuffling batch loader.
///
/// Batch order always equals sample order; samples encode time, so
/// shuffling would break evaluation continuity. Iteration is restartable:
/// every call to [`SequentialLoader::iter`] starts over from the first
/// sample.
#[derive(Debug, Clone)]
pub struct SequentialLoader {
    pub dataset: TensorDataset,
    pub batch_size: usize,
    /// Drop a trailing batch smaller than `batch_size`
    pub drop_last: bool,
}

impl SequentialLoader {
    /// Create a loader over `dataset`.
    pub fn new(dataset: TensorDataset, batch_size: usize, drop_last: bool) -> Result<Self> {
        if batch_size == 0 {
            return Err(TimeDiffusionError::InvalidParameter(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            dataset,
            batch_size,
            drop_last,
        })
    }

    /// Number of batches one pass will yield.
    pub fn num_batches(&self) -> usize {
        if self.drop_last {
            self.dataset.len() / self.batch_size
        } else {
            (self.dataset.len() + self.batch_size - 1) / self.batch_size
        }
    }

    /// Iterate over `(features, targets)` batches in time order.
    pub fn iter(&self) -> Batches<'_> {
        Batches {
            loader: self,
            cursor: 0,
        }
    }
}

/// Iterator over contiguous batches of a [`SequentialLoader`].
pub struct Batches<'a> {
    loader: &'a SequentialLoader,
    cursor: usize,
}

impl<'a> Iterator for Batches<'a> {
    type Item = (Array2<f32>, Array2<f32>);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.loader.dataset.len();
        if self.cursor >= len {
            return None;
        }
        let end = (self.cursor + self.loader.batch_size).min(len);
        if self.loader.drop_last && end - self.cursor < self.loader.batch_size {
            return None;
        }

        let features = self
            .loader
            .dataset
            .features
            .slice(s![self.cursor..end, ..])
            .to_owned();
        let targets = self
            .loader
            .dataset
            .targets
            .slice(s![self.cursor..end, ..])
            .to_owned();
        self.cursor = end;

        Some((features, targets))
    }
}
