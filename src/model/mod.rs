//! Temporal Convolutional Model
//!
//! WaveNet-style stack of dilated causal convolution blocks with skip
//! connections.

mod block;
mod conv;
mod network;

pub use block::TemporalBlock;
pub use conv::CausalConv1d;
pub use network::{TimeDiffusion, DILATIONS, RESIDUAL_CHANNELS};
