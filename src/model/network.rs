//! The full temporal stack.

use ndarray::Array2;

use super::block::TemporalBlock;
use super::conv::CausalConv1d;

/// Channel width of the residual path.
pub const RESIDUAL_CHANNELS: usize = 128;

/// Dilation ladder of the stack, one entry per dilated block. Declared
/// literally so the topology can be read off in one glance.
pub const DILATIONS: [usize; 14] = [
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192,
];

/// Dropout applied inside the input block only.
const INPUT_DROPOUT: f64 = 0.25;

/// WaveNet-style generative network over univariate series.
///
/// An input block widens 1 channel to [`RESIDUAL_CHANNELS`] with a kernel-1
/// convolution; 14 dilated blocks (kernel 2, dilations from [`DILATIONS`])
/// follow, each emitting a skip output next to its pass-through output; a
/// final 1x1 convolution maps the sum of the last pass-through output and
/// all skip outputs back down to 1 channel. Sequence length is preserved end
/// to end and every output sample depends only on current and past inputs,
/// with a receptive field that doubles per block.
///
/// The topology is fixed at construction; only the weights change during
/// training.
#[derive(Debug, Clone)]
pub struct TimeDiffusion {
    blocks: Vec<TemporalBlock>,
    output: CausalConv1d,
}

impl TimeDiffusion {
    /// Build the network with freshly initialized weights
    pub fn new() -> Self {
        let mut blocks = Vec::with_capacity(1 + DILATIONS.len());
        blocks.push(TemporalBlock::new(1, RESIDUAL_CHANNELS, 1, 1, INPUT_DROPOUT));
        for &dilation in DILATIONS.iter() {
            blocks.push(TemporalBlock::new(
                RESIDUAL_CHANNELS,
                RESIDUAL_CHANNELS,
                2,
                dilation,
                0.0,
            ));
        }
        let output = CausalConv1d::new(RESIDUAL_CHANNELS, 1, 1, 1);

        Self { blocks, output }
    }

    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [1, seq_len]
    /// * `training` - Whether in training mode (affects dropout)
    ///
    /// # Returns
    /// Output tensor of shape [1, seq_len]
    pub fn forward(&self, input: &Array2<f64>, training: bool) -> Array2<f64> {
        let seq_len = input.dim().1;
        let mut skip_sum: Array2<f64> = Array2::zeros((RESIDUAL_CHANNELS, seq_len));

        let mut x = input.clone();
        for block in &self.blocks {
            let (skip, main) = block.forward(&x, training);
            skip_sum = skip_sum + skip;
            x = main;
        }

        self.output.forward(&(&x + &skip_sum))
    }

    /// Number of blocks in the stack, input block included
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Receptive field of the whole stack
    pub fn receptive_field(&self) -> usize {
        1 + self
            .blocks
            .iter()
            .map(|b| b.receptive_field() - 1)
            .sum::<usize>()
    }

    /// Get total number of parameters
    pub fn num_parameters(&self) -> usize {
        let block_params: usize = self.blocks.iter().map(|b| b.num_parameters()).sum();
        block_params + self.output.num_parameters()
    }
}

impl Default for TimeDiffusion {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilation_ladder_doubles() {
        assert_eq!(DILATIONS.len(), 14);
        for pair in DILATIONS.windows(2) {
            assert_eq!(pair[1], pair[0] * 2);
        }
        assert_eq!(DILATIONS[0], 1);
        assert_eq!(DILATIONS[13], 8192);
    }

    #[test]
    fn test_stack_layout() {
        let model = TimeDiffusion::new();
        assert_eq!(model.num_blocks(), 15);
        assert!(model.num_parameters() > 0);
    }

    #[test]
    fn test_receptive_field() {
        let model = TimeDiffusion::new();
        // Input block contributes nothing; each dilated block adds 2 * d.
        let expected = 1 + 2 * DILATIONS.iter().sum::<usize>();
        assert_eq!(model.receptive_field(), expected);
        assert_eq!(model.receptive_field(), 32767);
    }

    #[test]
    fn test_forward_preserves_shape() {
        let model = TimeDiffusion::new();
        let input = Array2::ones((1, 8));
        let output = model.forward(&input, false);

        assert_eq!(output.dim(), (1, 8));
    }

    #[test]
    fn test_forward_is_causal() {
        // Outputs before an impulse match the all-zero response exactly.
        let model = TimeDiffusion::new();

        let silent = Array2::zeros((1, 10));
        let mut impulse = Array2::zeros((1, 10));
        impulse[[0, 5]] = 1.0;

        let out_silent = model.forward(&silent, false);
        let out_impulse = model.forward(&impulse, false);
        for t in 0..5 {
            assert!((out_silent[[0, t]] - out_impulse[[0, t]]).abs() < 1e-9);
        }
    }
}
