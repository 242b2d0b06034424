//! Dilated causal convolution layer.

use ndarray::{s, Array1, Array2};
use rand::Rng;
use rand_distr::Normal;

/// Causal 1D convolution layer.
///
/// Output at time t only depends on inputs at times <= t. Left padding of
/// `(kernel_size - 1) * dilation` keeps the output the same length as the
/// input.
#[derive(Debug, Clone)]
pub struct CausalConv1d {
    /// Convolution weights [out_channels, in_channels * kernel_size]
    pub weights: Array2<f64>,
    /// Bias terms [out_channels]
    pub bias: Array1<f64>,
    /// Input channels
    pub in_channels: usize,
    /// Output channels
    pub out_channels: usize,
    /// Kernel size
    pub kernel_size: usize,
    /// Dilation factor
    pub dilation: usize,
}

impl CausalConv1d {
    /// Create a new causal convolution layer with He-initialized weights
    pub fn new(in_channels: usize, out_channels: usize, kernel_size: usize, dilation: usize) -> Self {
        let mut rng = rand::thread_rng();
        let normal = Normal::new(0.0, (2.0 / (in_channels * kernel_size) as f64).sqrt()).unwrap();

        let weights = Array2::from_shape_fn((out_channels, in_channels * kernel_size), |_| {
            rng.sample(normal)
        });
        let bias = Array1::zeros(out_channels);

        Self {
            weights,
            bias,
            in_channels,
            out_channels,
            kernel_size,
            dilation,
        }
    }

    /// Left padding required to keep the output causal and length-preserving
    pub fn padding(&self) -> usize {
        (self.kernel_size - 1) * self.dilation
    }

    /// Receptive field of this single layer
    pub fn receptive_field(&self) -> usize {
        1 + (self.kernel_size - 1) * self.dilation
    }

    /// Forward pass through the causal convolution
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [in_channels, seq_len]
    ///
    /// # Returns
    /// Output tensor of shape [out_channels, seq_len]
    pub fn forward(&self, input: &Array2<f64>) -> Array2<f64> {
        let (in_channels, seq_len) = input.dim();
        assert_eq!(in_channels, self.in_channels, "input channels mismatch");

        let padding = self.padding();
        let mut padded = Array2::zeros((in_channels, seq_len + padding));
        padded.slice_mut(s![.., padding..]).assign(input);

        let mut output = Array2::zeros((self.out_channels, seq_len));
        for t in 0..seq_len {
            for out_c in 0..self.out_channels {
                let mut sum = self.bias[out_c];
                for k in 0..self.kernel_size {
                    let input_idx = t + padding - k * self.dilation;
                    for in_c in 0..self.in_channels {
                        sum += self.weights[[out_c, in_c * self.kernel_size + k]]
                            * padded[[in_c, input_idx]];
                    }
                }
                output[[out_c, t]] = sum;
            }
        }

        output
    }

    /// Get total number of parameters
    pub fn num_parameters(&self) -> usize {
        self.weights.len() + self.bias.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let conv = CausalConv1d::new(16, 32, 2, 4);
        assert_eq!(conv.in_channels, 16);
        assert_eq!(conv.out_channels, 32);
        assert_eq!(conv.kernel_size, 2);
        assert_eq!(conv.dilation, 4);
        assert_eq!(conv.padding(), 4);
    }

    #[test]
    fn test_receptive_field() {
        assert_eq!(CausalConv1d::new(1, 1, 2, 1).receptive_field(), 2);
        assert_eq!(CausalConv1d::new(1, 1, 2, 8).receptive_field(), 9);
        assert_eq!(CausalConv1d::new(1, 1, 1, 1).receptive_field(), 1);
    }

    #[test]
    fn test_forward_preserves_length() {
        let conv = CausalConv1d::new(2, 4, 2, 8);
        let input = Array2::ones((2, 20));
        let output = conv.forward(&input);

        assert_eq!(output.dim(), (4, 20));
    }

    #[test]
    fn test_causal_property() {
        // An impulse must not influence outputs at earlier timesteps.
        let conv = CausalConv1d::new(1, 1, 2, 3);

        let silent = Array2::zeros((1, 12));
        let mut impulse = Array2::zeros((1, 12));
        impulse[[0, 6]] = 1.0;

        let out_silent = conv.forward(&silent);
        let out_impulse = conv.forward(&impulse);
        for t in 0..6 {
            assert!((out_silent[[0, t]] - out_impulse[[0, t]]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_num_parameters() {
        let conv = CausalConv1d::new(3, 5, 2, 1);
        assert_eq!(conv.num_parameters(), 5 * 3 * 2 + 5);
    }
}
