//! Chronological train / validation / test splitting.

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Slice};

use crate::{Result, TimeDiffusionError};

/// One value per partition of a chronological split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<T> {
    pub train: T,
    pub val: T,
    pub test: T,
}

impl<T> Split<T> {
    /// Apply `f` to each partition, keeping the split structure.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Split<U> {
        Split {
            train: f(self.train),
            val: f(self.val),
            test: f(self.test),
        }
    }
}

/// Partition lengths of a chronological split. Validation and test lengths
/// are always whole multiples of the sub-sampling rate; train receives the
/// remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLengths {
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

impl SplitLengths {
    /// Compute partition lengths for `len` samples.
    ///
    /// `val_size` and `test_size` are fractions of the logical length
    /// `len / rate`, so sub-sampled series keep their partition boundaries
    /// aligned to whole rate-sized groups: each fractional length is rounded
    /// to the nearest count of groups, then scaled back by `rate`.
    pub fn compute(len: usize, val_size: f64, test_size: f64, rate: usize) -> Result<Self> {
        if rate == 0 {
            return Err(TimeDiffusionError::InvalidParameter(
                "rate must be at least 1".to_string(),
            ));
        }
        for (name, size) in [("val_size", val_size), ("test_size", test_size)] {
            if !(0.0..1.0).contains(&size) {
                return Err(TimeDiffusionError::InvalidParameter(format!(
                    "{name} must lie in [0, 1), got {size}"
                )));
            }
        }
        if val_size + test_size >= 1.0 {
            return Err(TimeDiffusionError::InvalidParameter(format!(
                "val_size + test_size must stay below 1, got {}",
                val_size + test_size
            )));
        }

        let logical = len as f64 / rate as f64;
        let val = (logical * val_size).round() as usize * rate;
        let test = (logical * test_size).round() as usize * rate;
        if val + test > len {
            return Err(TimeDiffusionError::InvalidParameter(format!(
                "split sizes cover {} samples but only {len} are available",
                val + test
            )));
        }

        Ok(Self {
            train: len - val - test,
            val,
            test,
        })
    }

    /// Total number of samples covered by the three partitions.
    pub fn total(&self) -> usize {
        self.train + self.val + self.test
    }
}

/// Slice `arr` along its leading axis into train / validation / test parts.
///
/// Partitions are contiguous, ordered and exhaustive. Sample order encodes
/// time, so no reshuffling happens here or anywhere downstream. Each
/// partition owns its buffer; mutating one cannot corrupt another.
pub fn split_array<S, D>(
    arr: &ArrayBase<S, D>,
    lengths: SplitLengths,
) -> Result<Split<Array<f64, D>>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let n = arr.len_of(Axis(0));
    if n != lengths.total() {
        return Err(TimeDiffusionError::LengthMismatch {
            left: n,
            right: lengths.total(),
        });
    }

    let val_end = lengths.train + lengths.val;
    Ok(Split {
        train: arr
            .slice_axis(Axis(0), Slice::from(..lengths.train))
            .to_owned(),
        val: arr
            .slice_axis(Axis(0), Slice::from(lengths.train..val_end))
            .to_owned(),
        test: arr.slice_axis(Axis(0), Slice::from(val_end..)).to_owned(),
    })
}

/// Split two sample-aligned arrays with boundaries computed once from the
/// first and applied to both, so every partition is cut at identical
/// indices. Mismatched leading lengths fail fast.
pub fn split_pair<S1, S2, D1, D2>(
    x: &ArrayBase<S1, D1>,
    y: &ArrayBase<S2, D2>,
    val_size: f64,
    test_size: f64,
    rate: usize,
) -> Result<(Split<Array<f64, D1>>, Split<Array<f64, D2>>)>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D1: Dimension,
    D2: Dimension,
{
    let lengths = SplitLengths::compute(x.len_of(Axis(0)), val_size, test_size, rate)?;
    if y.len_of(Axis(0)) != lengths.total() {
        return Err(TimeDiffusionError::LengthMismatch {
            left: x.len_of(Axis(0)),
            right: y.len_of(Axis(0)),
        });
    }
    Ok((split_array(x, lengths)?, split_array(y, lengths)?))
}
