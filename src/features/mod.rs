//! Series Transforms Module
//!
//! Provides log returns, smoothing utilities and reversible normalization.

mod returns;
mod scaler;
mod smoothing;

pub use returns::log_returns;
pub use scaler::StandardScaler;
pub use smoothing::{default_window, is_high_frequency, moving_average, DEFAULT_ROLLING_PARTS};
