use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;

/// Describes one hidden or output layer before its weights exist.
///
/// Fields:
/// - `size`: number of neurons in this layer
/// - `activation`: activation function applied after the linear transform
/// - `bias`: scalar bias shared by every neuron of the layer
///
/// The number of incoming connections is not part of the description; the
/// builder derives it from the previous layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub activation: ActivationFunction,
    #[serde(default = "default_bias")]
    pub bias: f64,
}

impl LayerSpec {
    pub fn new(size: usize, activation: ActivationFunction, bias: f64) -> LayerSpec {
        LayerSpec { size, activation, bias }
    }
}

fn default_bias() -> f64 {
    1.0
}
