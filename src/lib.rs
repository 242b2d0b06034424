//! # TimeDiffusion
//!
//! Time series preparation and temporal convolutional modeling for financial
//! price data.
//!
//! ## Overview
//!
//! The crate turns raw price series into aligned, normalized, windowed
//! train / validation / test tensors while preserving temporal order, and
//! provides a WaveNet-style dilated causal convolution network together with
//! the error measures used to train and evaluate it.
//!
//! ## Modules
//!
//! - `features` - log returns, smoothing and reversible normalization
//! - `dataset` - windowing, chronological splitting and batch iteration
//! - `pipeline` - end-to-end dataset construction
//! - `metrics` - scalar and weighted error measures
//! - `model` - dilated causal convolution stack with skip connections
//!
//! ## Example
//!
//! ```rust,no_run
//! use ndarray::Array1;
//! use timediffusion::prelude::*;
//!
//! fn main() -> timediffusion::Result<()> {
//!     let prices = Array1::linspace(100.0, 140.0, 512);
//!
//!     let config = PipelineConfig {
//!         lags: 32,
//!         horizon: 8,
//!         ..PipelineConfig::default()
//!     };
//!     let bundle = prepare_dataset(&prices, &prices, &config, None)?;
//!     println!("train samples: {}", bundle.x.train.nrows());
//!
//!     let model = TimeDiffusion::new();
//!     println!("receptive field: {}", model.receptive_field());
//!
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod features;
pub mod metrics;
pub mod model;
pub mod pipeline;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dataset::{
        build_windows, split_array, split_pair, SequentialLoader, Split, SplitLengths,
        TensorDataset,
    };
    pub use crate::features::{is_high_frequency, log_returns, moving_average, StandardScaler};
    pub use crate::metrics::{mae, mape, mse, wape, wmape};
    pub use crate::model::{CausalConv1d, TemporalBlock, TimeDiffusion};
    pub use crate::pipeline::{
        normalize_split, prepare_dataset, prepare_loaders, DataLoaders, DatasetBundle,
        LoaderConfig, PipelineConfig,
    };
}

/// Error types for the crate
#[derive(thiserror::Error, Debug)]
pub enum TimeDiffusionError {
    #[error("length mismatch along the sample axis: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, TimeDiffusionError>;

// Re-export main types at crate root for convenience
pub use dataset::{Split, SplitLengths};
pub use features::StandardScaler;
pub use model::TimeDiffusion;
pub use pipeline::{prepare_dataset, prepare_loaders, DatasetBundle, PipelineConfig};
