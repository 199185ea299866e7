use crate::math::matrix::Matrix;
use crate::math::ops;
use crate::network::network::Network;

/// Weight and bias gradients for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    pub weights: Matrix,
    pub bias: f64,
}

impl LayerGradients {
    pub fn zeros(size: usize, input_size: usize) -> LayerGradients {
        LayerGradients {
            weights: Matrix::zeros(size, input_size),
            bias: 0.0,
        }
    }

    pub fn add(&self, rhs: &LayerGradients) -> LayerGradients {
        LayerGradients {
            weights: ops::add(&self.weights, &rhs.weights),
            bias: self.bias + rhs.bias,
        }
    }

    pub fn scale(&self, s: f64) -> LayerGradients {
        LayerGradients {
            weights: ops::scale(&self.weights, s),
            bias: self.bias * s,
        }
    }
}

/// Gradients for every trainable layer of a network.
///
/// Entry `k` belongs to network layer `k + 1`; the input layer has no
/// gradients.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkGradients {
    layers: Vec<LayerGradients>,
}

impl NetworkGradients {
    pub fn new(layers: Vec<LayerGradients>) -> NetworkGradients {
        NetworkGradients { layers }
    }

    /// All-zero gradients shaped like `network`, the identity for [`add`](Self::add).
    pub fn zeros_like(network: &Network) -> NetworkGradients {
        let layers = network.layers().iter().skip(1)
            .map(|layer| LayerGradients::zeros(layer.size(), layer.input_size()))
            .collect();
        NetworkGradients { layers }
    }

    /// Gradients for network layer `index` (`index >= 1`).
    pub fn layer(&self, index: usize) -> &LayerGradients {
        assert!(index >= 1, "the input layer has no gradients");
        &self.layers[index - 1]
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn add(&self, rhs: &NetworkGradients) -> NetworkGradients {
        assert_eq!(self.layers.len(), rhs.layers.len(), "gradient sets have different depths");
        NetworkGradients {
            layers: self.layers.iter().zip(rhs.layers.iter()).map(|(a, b)| a.add(b)).collect(),
        }
    }

    pub fn scale(&self, s: f64) -> NetworkGradients {
        NetworkGradients {
            layers: self.layers.iter().map(|g| g.scale(s)).collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LayerGradients> {
        self.layers.iter()
    }
}
