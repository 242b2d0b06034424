//! End-to-end dataset construction.
//!
//! Composes log-return conversion, windowing, chronological splitting and
//! train-fitted normalization into one deterministic function, mirrored by a
//! variant that produces batch loaders instead of raw arrays.

use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::{
    build_windows, split_array, SequentialLoader, Split, SplitLengths, TensorDataset,
};
use crate::features::{log_returns, StandardScaler};
use crate::Result;

/// Stage toggles and shape parameters for dataset construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of past values per feature window
    pub lags: usize,
    /// Number of future values per target window
    pub horizon: usize,
    /// Step between consecutive window start positions
    pub stride: usize,
    /// Validation fraction of the logical sample count
    pub val_size: f64,
    /// Test fraction of the logical sample count
    pub test_size: f64,
    /// Sub-sampling factor; split boundaries stay multiples of it
    pub rate: usize,
    /// Convert both series to log returns before windowing
    pub log_returns: bool,
    /// Standardize the splits with train-fitted statistics
    pub normalize: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lags: 1,
            horizon: 1,
            stride: 1,
            val_size: 0.15,
            test_size: 0.15,
            rate: 1,
            log_returns: true,
            normalize: true,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the configuration to a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Batch loader parameters for [`prepare_loaders`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Samples per batch
    pub batch_size: usize,
    /// Drop a trailing batch smaller than `batch_size`
    pub drop_last: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            drop_last: false,
        }
    }
}

/// Ready-to-train sample arrays plus the scalers that produced them.
#[derive(Debug, Clone)]
pub struct DatasetBundle {
    /// Feature windows per split, [samples, lags]
    pub x: Split<Array2<f64>>,
    /// Target windows per split, [samples, horizon]
    pub y: Split<Array2<f64>>,
    /// Scaler fitted on (or applied to) the feature windows
    pub scaler_x: Option<StandardScaler>,
    /// Scaler fitted on (or applied to) the target windows
    pub scaler_y: Option<StandardScaler>,
}

/// Batch loaders per split plus the scalers that produced them.
#[derive(Debug)]
pub struct DataLoaders {
    pub train: SequentialLoader,
    pub val: SequentialLoader,
    pub test: SequentialLoader,
    pub scaler_x: Option<StandardScaler>,
    pub scaler_y: Option<StandardScaler>,
}

/// Standardize a split with statistics fitted on its train part only, so no
/// validation or test information leaks into the transform.
pub fn normalize_split(split: Split<Array2<f64>>) -> Result<(Split<Array2<f64>>, StandardScaler)> {
    let scaler = StandardScaler::fit(&split.train)?;
    let transformed = split.map(|part| scaler.transform(&part));
    Ok((transformed, scaler))
}

/// Build aligned, normalized train / validation / test sample arrays from a
/// pair of raw series.
///
/// Stages run in a fixed order: optional log-return conversion of both
/// series, windowing, chronological splitting with boundaries computed once
/// and applied to features and targets alike, then optional normalization.
///
/// When `shared_scaler` is `None` and normalization is enabled, one scaler
/// per side is fitted on the train split alone and reused for validation and
/// test. Passing `shared_scaler: Some(..)` instead applies those exact
/// statistics to all six arrays, so features and targets deliberately share
/// one scale; that fits return-shaped series where both sides live in the
/// same units, and both scaler slots of the bundle then hold the shared
/// parameters.
///
/// Normalization requires a non-empty train split; series too short for any
/// window therefore only pass through (as empty, correctly-shaped arrays)
/// with `normalize` disabled.
pub fn prepare_dataset(
    x: &Array1<f64>,
    y: &Array1<f64>,
    config: &PipelineConfig,
    shared_scaler: Option<&StandardScaler>,
) -> Result<DatasetBundle> {
    let (x, y) = if config.log_returns {
        (log_returns(x), log_returns(y))
    } else {
        (x.clone(), y.clone())
    };

    let (x_windows, y_windows) =
        build_windows(&x, &y, config.lags, config.horizon, config.stride)?;
    debug!(
        windows = x_windows.nrows(),
        lags = config.lags,
        horizon = config.horizon,
        "built supervised windows"
    );

    let lengths = SplitLengths::compute(
        x_windows.nrows(),
        config.val_size,
        config.test_size,
        config.rate,
    )?;
    debug!(
        train = lengths.train,
        val = lengths.val,
        test = lengths.test,
        "computed split boundaries"
    );
    let x_split = split_array(&x_windows, lengths)?;
    let y_split = split_array(&y_windows, lengths)?;

    if !config.normalize {
        return Ok(DatasetBundle {
            x: x_split,
            y: y_split,
            scaler_x: None,
            scaler_y: None,
        });
    }

    match shared_scaler {
        Some(scaler) => Ok(DatasetBundle {
            x: x_split.map(|part| scaler.transform(&part)),
            y: y_split.map(|part| scaler.transform(&part)),
            scaler_x: Some(*scaler),
            scaler_y: Some(*scaler),
        }),
        None => {
            let (x, scaler_x) = normalize_split(x_split)?;
            let (y, scaler_y) = normalize_split(y_split)?;
            Ok(DatasetBundle {
                x,
                y,
                scaler_x: Some(scaler_x),
                scaler_y: Some(scaler_y),
            })
        }
    }
}

/// Like [`prepare_dataset`], but converts each split to single-precision
/// tensors and wraps it in a sequential batch loader. Batch order equals
/// time order; shuffling is never performed.
pub fn prepare_loaders(
    x: &Array1<f64>,
    y: &Array1<f64>,
    config: &PipelineConfig,
    loader: &LoaderConfig,
    shared_scaler: Option<&StandardScaler>,
) -> Result<DataLoaders> {
    let bundle = prepare_dataset(x, y, config, shared_scaler)?;

    let train = SequentialLoader::new(
        TensorDataset::new(bundle.x.train, bundle.y.train)?,
        loader.batch_size,
        loader.drop_last,
    )?;
    let val = SequentialLoader::new(
        TensorDataset::new(bundle.x.val, bundle.y.val)?,
        loader.batch_size,
        loader.drop_last,
    )?;
    let test = SequentialLoader::new(
        TensorDataset::new(bundle.x.test, bundle.y.test)?,
        loader.batch_size,
        loader.drop_last,
    )?;

    Ok(DataLoaders {
        train,
        val,
        test,
        scaler_x: bundle.scaler_x,
        scaler_y: bundle.scaler_y,
    })
}
