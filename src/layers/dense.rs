use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::math::matrix::Matrix;
use crate::math::neurons::Neurons;
use crate::math::ops;
use crate::optim::gradients::LayerGradients;

/// Fully connected layer.
///
/// `weights` is `size x input_size`: row `i` is a neuron of this layer and
/// column `j` a neuron of the previous layer, so the forward projection is
/// `weights · previous`. A single scalar bias is shared by every neuron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    weights: Matrix,
    bias: f64,
    activation: ActivationFunction,
}

impl Layer {
    /// Zero-weighted layer of `size` neurons fed by `input_size` neurons.
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction, bias: f64) -> Layer {
        Layer {
            weights: Matrix::zeros(size, input_size),
            bias,
            activation,
        }
    }

    /// The network's first layer. It has no incoming connections; its
    /// "weights" are the raw input values held as a column.
    pub fn input(values: &Neurons) -> Layer {
        Layer {
            weights: values.as_matrix().clone(),
            bias: 1.0,
            activation: ActivationFunction::Linear,
        }
    }

    /// Number of neurons in this layer.
    pub fn size(&self) -> usize {
        self.weights.m()
    }

    /// Number of neurons feeding this layer.
    pub fn input_size(&self) -> usize {
        self.weights.n()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut Matrix {
        &mut self.weights
    }

    /// Weight from source neuron `j` (previous layer) into neuron `i`.
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights.value(i, j)
    }

    pub fn weight_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        self.weights.value_mut(i, j)
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    /// Weights plus the shared bias.
    pub fn parameter_count(&self) -> usize {
        self.weights.size() + 1
    }

    /// Forward step from the previous layer's activations.
    /// Returns `(z, a)`: the pre-activation and activated columns.
    pub fn feed_from(&self, previous: &Neurons) -> (Neurons, Neurons) {
        assert_eq!(
            previous.len(),
            self.input_size(),
            "layer expects {} inputs, got {}",
            self.input_size(),
            previous.len()
        );
        let z = Neurons::from_matrix(ops::add_scalar(&ops::product(&self.weights, previous), self.bias));
        let a = self.activation.apply(&z);
        (z, a)
    }

    /// Gradients for this layer given its local gradient `delta` and the
    /// activations of the previous layer.
    ///
    /// The weight gradient is the outer product `delta · previousᵀ`; the bias
    /// gradient is the mean of `delta`, since the bias is shared.
    pub fn compute_gradients(&self, delta: &Neurons, previous: &Neurons) -> LayerGradients {
        assert_eq!(delta.len(), self.size(), "delta does not match layer size");
        let weights = ops::product(delta, &ops::transpose(previous));
        let bias = ops::mean(delta);
        LayerGradients { weights, bias }
    }

    /// Gradient of the loss with respect to the previous layer's activations.
    pub fn propagate(&self, delta: &Neurons) -> Neurons {
        Neurons::from_matrix(ops::product(&ops::transpose(&self.weights), delta))
    }

    /// Gradient-descent step with pre-computed gradients.
    pub fn apply_gradients(&mut self, gradients: &LayerGradients, lr: f64) {
        self.weights = ops::subtract(&self.weights, &ops::scale(&gradients.weights, lr));
        self.bias -= lr * gradients.bias;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_by_three() -> Layer {
        let mut layer = Layer::new(2, 3, ActivationFunction::Linear, 0.5);
        *layer.weights_mut() = Matrix::from_vec(vec![0.1, 0.3, 0.5, 0.2, 0.4, 0.6], 3);
        layer
    }

    #[test]
    fn new_layer_has_zero_weights_of_the_right_shape() {
        let layer = Layer::new(4, 3, ActivationFunction::Sigmoid, 1.0);
        assert_eq!(layer.size(), 4);
        assert_eq!(layer.input_size(), 3);
        assert_eq!(layer.weights().size(), 12);
        assert!(layer.weights().values().iter().all(|&w| w == 0.0));
        assert_eq!(layer.parameter_count(), 13);
    }

    #[test]
    fn input_layer_holds_raw_values() {
        let layer = Layer::input(&Neurons::from(vec![1.0, 2.0]));
        assert_eq!(layer.size(), 2);
        assert_eq!(layer.weights().size(), 2);
        assert_eq!(layer.activation(), ActivationFunction::Linear);
        assert_eq!(layer.bias(), 1.0);
    }

    #[test]
    fn feed_from_projects_and_adds_bias() {
        let (z, a) = two_by_three().feed_from(&Neurons::from(vec![1.0, 4.0, 5.0]));
        assert_relative_eq!(z[0], 4.3, epsilon = 1e-12);
        assert_relative_eq!(z[1], 5.3, epsilon = 1e-12);
        assert_eq!(z, a);
    }

    #[test]
    #[should_panic]
    fn feed_from_rejects_wrong_input_length() {
        two_by_three().feed_from(&Neurons::new(2));
    }

    #[test]
    fn gradients_are_outer_product_and_mean() {
        let layer = two_by_three();
        let gradients = layer.compute_gradients(&Neurons::from(vec![1.0, -0.5]), &Neurons::from(vec![1.0, 2.0, 3.0]));
        assert_eq!(gradients.weights, Matrix::from_vec(vec![1.0, 2.0, 3.0, -0.5, -1.0, -1.5], 3));
        assert_relative_eq!(gradients.bias, 0.25);
    }

    #[test]
    fn propagate_uses_transposed_weights() {
        let back = two_by_three().propagate(&Neurons::from(vec![1.0, 1.0]));
        assert_eq!(back.len(), 3);
        assert_relative_eq!(back[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(back[2], 1.1, epsilon = 1e-12);
    }

    #[test]
    fn apply_gradients_descends() {
        let mut layer = two_by_three();
        let gradients = LayerGradients {
            weights: Matrix::from_vec(vec![1.0; 6], 3),
            bias: 2.0,
        };
        layer.apply_gradients(&gradients, 0.1);
        assert_relative_eq!(layer.weight(0, 0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(layer.weight(1, 2), 0.5, epsilon = 1e-12);
        assert_relative_eq!(layer.bias(), 0.3, epsilon = 1e-12);
    }
}
