use crate::layers::dense::Layer;
use crate::network::network::Network;
use crate::optim::gradients::{LayerGradients, NetworkGradients};

/// Plain gradient descent: `param -= learning_rate * gradient`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Moves `layer` against `gradients`, scaled by the learning rate. The
    /// gradient shapes must match the layer's weights.
    pub fn step(&self, layer: &mut Layer, gradients: &LayerGradients) {
        layer.apply_gradients(gradients, self.learning_rate);
    }

    /// Returns a copy of `network` with every layer after the input updated.
    pub fn apply(&self, network: &Network, gradients: &NetworkGradients) -> Network {
        assert_eq!(
            gradients.len() + 1,
            network.len(),
            "gradients cover {} layers but the network has {}",
            gradients.len() + 1,
            network.len()
        );
        let mut updated = network.clone();
        for (index, layer_gradients) in gradients.iter().enumerate() {
            self.step(&mut updated[index + 1], layer_gradients);
        }
        updated
    }
}
