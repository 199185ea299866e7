use std::ops::{Index, IndexMut};

use log::trace;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::layers::io::{Input, Output};
use crate::math::neurons::Neurons;
use crate::math::ops;
use crate::network::builder::NetworkBuilder;
use crate::network::observation::Observation;
use crate::network::spec::LayerSpec;

/// A fully connected feed-forward network.
///
/// Layer 0 is the input layer: only its size (and optional raw values) matter.
/// Every later layer `l` has a `size(l) x size(l - 1)` weight matrix.
/// Training never mutates a network in place; it produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    layers: Vec<Layer>,
}

#[derive(Deserialize)]
struct RawNetwork {
    layers: Vec<Layer>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = NetworkError;

    fn try_from(raw: RawNetwork) -> Result<Network> {
        Network::try_from_layers(raw.layers)
    }
}

impl Network {
    /// Builds a network chaining `input -> hidden... -> output`. With no hidden
    /// layers the input connects straight to the output.
    pub fn new(input: &Input, hidden: &[LayerSpec], output: &Output) -> Result<Network> {
        hidden.iter()
            .fold(NetworkBuilder::new().input_values(input.neurons().clone()), |builder, spec| {
                builder.hidden_layer(*spec)
            })
            .output(output.size(), output.activation(), output.bias())
            .build()
    }

    pub(crate) fn from_layers(layers: Vec<Layer>) -> Network {
        assert!(layers.len() >= 2, "a network needs at least an input and an output layer");
        Network { layers }
    }

    /// Checked assembly from ready-made layers, e.g. ones read back from disk.
    ///
    /// Every layer must be non-empty, layer 0 must be a single column of input
    /// values and each later layer must take exactly as many inputs as the
    /// layer before it has neurons.
    pub fn try_from_layers(layers: Vec<Layer>) -> Result<Network> {
        if layers.len() < 2 {
            return Err(NetworkError::InvalidNetwork(format!(
                "a network needs an input and an output layer, got {} layers",
                layers.len()
            )));
        }
        for (index, layer) in layers.iter().enumerate() {
            if layer.size() == 0 {
                return Err(NetworkError::EmptyLayer { index });
            }
        }
        if layers[0].input_size() != 1 {
            return Err(NetworkError::InvalidNetwork(format!(
                "input layer must be a single column, got {} columns",
                layers[0].input_size()
            )));
        }
        for l in 1..layers.len() {
            if layers[l].input_size() != layers[l - 1].size() {
                return Err(NetworkError::InvalidNetwork(format!(
                    "layer {} takes {} inputs but layer {} has {} neurons",
                    l,
                    layers[l].input_size(),
                    l - 1,
                    layers[l - 1].size()
                )));
            }
        }
        Ok(Network { layers })
    }

    /// Number of layers, the input layer included.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size()
    }

    /// Neuron count of every layer, input first.
    pub fn topology(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::size).collect()
    }

    /// Trainable weights and biases (the input layer has none).
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().skip(1).map(Layer::parameter_count).sum()
    }

    /// Re-draws every weight and bias from Uniform(0, 1) using the thread RNG.
    pub fn reset(&mut self) {
        self.reset_with(&mut rand::thread_rng());
    }

    /// Same as [`reset`](Self::reset) with a caller-provided RNG, so a seeded
    /// generator gives reproducible networks.
    pub fn reset_with<R: Rng>(&mut self, rng: &mut R) {
        for layer in self.layers.iter_mut().skip(1) {
            for w in layer.weights_mut().values_mut() {
                *w = rng.gen::<f64>();
            }
            layer.set_bias(rng.gen::<f64>());
        }
    }

    /// Forward pass keeping every layer's `z` and `a`.
    ///
    /// # Panics
    /// Panics if the input length differs from the input layer's size.
    pub fn observe(&self, input: impl AsRef<Neurons>) -> Observation {
        let input = input.as_ref();
        assert_eq!(
            input.len(),
            self.input_size(),
            "input has {} values but the network expects {}",
            input.len(),
            self.input_size()
        );

        let mut observation = Observation::with_capacity(self.layers.len());
        observation.push(input.clone(), self.layers[0].activation().apply(input));

        for layer in self.layers.iter().skip(1) {
            let (z, a) = layer.feed_from(observation.output());
            observation.push(z, a);
        }

        trace!("observed output {:?}", observation.output().values());
        observation
    }

    /// Output activations for `input`.
    pub fn predict(&self, input: impl AsRef<Neurons>) -> Neurons {
        self.observe(input).into_output()
    }

    /// Index of the strongest output neuron for `input`.
    pub fn classify(&self, input: impl AsRef<Neurons>) -> usize {
        ops::largest(&self.predict(input))
    }
}

impl Index<usize> for Network {
    type Output = Layer;

    fn index(&self, layer: usize) -> &Layer {
        &self.layers[layer]
    }
}

impl IndexMut<usize> for Network {
    fn index_mut(&mut self, layer: usize) -> &mut Layer {
        &mut self.layers[layer]
    }
}
