//! Temporal block with skip and pass-through outputs.

use ndarray::Array2;

use super::conv::CausalConv1d;

/// One block of the temporal stack.
///
/// Structure:
/// ```text
/// input --> conv1 -> ReLU -> dropout -> conv2 -> ReLU -> dropout --> skip
///   |                                                          |
///   +----------------(residual, 1x1 when widening)-------------+-> ReLU -> main
/// ```
///
/// Both outputs have `out_channels` channels; the skip output feeds the
/// network-level skip sum while the main output feeds the next block.
#[derive(Debug, Clone)]
pub struct TemporalBlock {
    /// First convolution layer
    pub conv1: CausalConv1d,
    /// Second convolution layer
    pub conv2: CausalConv1d,
    /// Optional 1x1 convolution for matching channel widths on the residual path
    pub downsample: Option<CausalConv1d>,
    /// Dropout probability
    pub dropout: f64,
    /// Dilation factor for this block
    pub dilation: usize,
}

impl TemporalBlock {
    /// Create a new temporal block
    ///
    /// # Arguments
    /// * `in_channels` - Number of input channels
    /// * `out_channels` - Number of output channels
    /// * `kernel_size` - Convolution kernel size
    /// * `dilation` - Dilation factor
    /// * `dropout` - Dropout probability
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        kernel_size: usize,
        dilation: usize,
        dropout: f64,
    ) -> Self {
        let conv1 = CausalConv1d::new(in_channels, out_channels, kernel_size, dilation);
        let conv2 = CausalConv1d::new(out_channels, out_channels, kernel_size, dilation);

        let downsample = if in_channels != out_channels {
            Some(CausalConv1d::new(in_channels, out_channels, 1, 1))
        } else {
            None
        };

        Self {
            conv1,
            conv2,
            downsample,
            dropout,
            dilation,
        }
    }

    fn relu(x: &Array2<f64>) -> Array2<f64> {
        x.mapv(|v| v.max(0.0))
    }

    /// Inference-time dropout scaling; training mode thins activations
    fn apply_dropout(&self, x: Array2<f64>, training: bool) -> Array2<f64> {
        if training && self.dropout > 0.0 {
            x * (1.0 - self.dropout)
        } else {
            x
        }
    }

    /// Forward pass through the block
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [in_channels, seq_len]
    /// * `training` - Whether in training mode (affects dropout)
    ///
    /// # Returns
    /// `(skip, main)`, both of shape [out_channels, seq_len]
    pub fn forward(&self, input: &Array2<f64>, training: bool) -> (Array2<f64>, Array2<f64>) {
        let h = Self::relu(&self.conv1.forward(input));
        let h = self.apply_dropout(h, training);
        let h = Self::relu(&self.conv2.forward(&h));
        let skip = self.apply_dropout(h, training);

        let residual = match &self.downsample {
            Some(conv) => conv.forward(input),
            None => input.clone(),
        };
        let main = Self::relu(&(&skip + &residual));

        (skip, main)
    }

    /// Receptive field contributed by this block's two convolutions
    pub fn receptive_field(&self) -> usize {
        1 + 2 * (self.conv1.kernel_size - 1) * self.dilation
    }

    /// Get total number of parameters
    pub fn num_parameters(&self) -> usize {
        let mut params = self.conv1.num_parameters() + self.conv2.num_parameters();
        if let Some(ref conv) = self.downsample {
            params += conv.num_parameters();
        }
        params
    }
}
