use log::debug;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::math::neurons::Neurons;
use crate::network::network::Network;
use crate::network::spec::LayerSpec;

/// Step-by-step construction of a [`Network`].
///
/// Only neuron counts, activations and biases are given; `build` derives each
/// weight matrix shape from the neighbouring layers and allocates it zeroed.
///
/// ```
/// use feedforward_nn::{ActivationFunction, NetworkBuilder};
///
/// let net = NetworkBuilder::new()
///     .input(2)
///     .hidden(2, ActivationFunction::Sigmoid, 1.0)
///     .output(1, ActivationFunction::Sigmoid, 1.0)
///     .build()
///     .unwrap();
/// assert_eq!(net.len(), 3);
/// assert_eq!(net[1].weights().n(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    input: Option<Neurons>,
    hidden: Vec<LayerSpec>,
    output: Option<LayerSpec>,
}

impl NetworkBuilder {
    pub fn new() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    /// Input layer of `size` zero-valued neurons.
    pub fn input(self, size: usize) -> NetworkBuilder {
        self.input_values(Neurons::new(size))
    }

    /// Input layer holding the given raw values.
    pub fn input_values(mut self, values: Neurons) -> NetworkBuilder {
        self.input = Some(values);
        self
    }

    pub fn hidden(self, size: usize, activation: ActivationFunction, bias: f64) -> NetworkBuilder {
        self.hidden_layer(LayerSpec::new(size, activation, bias))
    }

    pub fn hidden_layer(mut self, spec: LayerSpec) -> NetworkBuilder {
        self.hidden.push(spec);
        self
    }

    pub fn output(self, size: usize, activation: ActivationFunction, bias: f64) -> NetworkBuilder {
        self.output_layer(LayerSpec::new(size, activation, bias))
    }

    pub fn output_layer(mut self, spec: LayerSpec) -> NetworkBuilder {
        self.output = Some(spec);
        self
    }

    pub fn build(self) -> Result<Network> {
        let input = self.input.ok_or(NetworkError::MissingInput)?;
        let output = self.output.ok_or(NetworkError::MissingOutput)?;
        if input.len() == 0 {
            return Err(NetworkError::EmptyLayer { index: 0 });
        }

        let mut layers = Vec::with_capacity(self.hidden.len() + 2);
        layers.push(Layer::input(&input));

        let mut previous = input.len();
        for (offset, spec) in self.hidden.iter().chain(std::iter::once(&output)).enumerate() {
            if spec.size == 0 {
                return Err(NetworkError::EmptyLayer { index: offset + 1 });
            }
            layers.push(Layer::new(spec.size, previous, spec.activation, spec.bias));
            previous = spec.size;
        }

        let network = Network::from_layers(layers);
        debug!("built network with topology {:?}", network.topology());
        Ok(network)
    }
}
