//! Supervised Dataset Module
//!
//! Windowing, chronological splitting and sequential batch iteration.

mod loader;
mod split;
mod windowing;

pub use loader::{Batches, SequentialLoader, TensorDataset};
pub use split::{split_array, split_pair, Split, SplitLengths};
pub use windowing::build_windows;
