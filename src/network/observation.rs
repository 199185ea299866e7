use std::ops::Index;

use crate::math::neurons::Neurons;

/// Per-layer trace of one forward pass.
///
/// Entry `l` holds layer `l`'s pre-activation `z` and activation `a`. For the
/// input layer both are the raw input. Back-propagation needs the activations
/// of every layer, so the whole trace is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pre_activations: Vec<Neurons>,
    activations: Vec<Neurons>,
}

impl Observation {
    pub(crate) fn with_capacity(layers: usize) -> Observation {
        Observation {
            pre_activations: Vec::with_capacity(layers),
            activations: Vec::with_capacity(layers),
        }
    }

    pub(crate) fn push(&mut self, z: Neurons, a: Neurons) {
        self.pre_activations.push(z);
        self.activations.push(a);
    }

    /// Number of layers traced.
    pub fn len(&self) -> usize {
        self.activations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activations.is_empty()
    }

    pub fn activation(&self, layer: usize) -> &Neurons {
        &self.activations[layer]
    }

    pub fn pre_activation(&self, layer: usize) -> &Neurons {
        &self.pre_activations[layer]
    }

    pub fn activations(&self) -> &[Neurons] {
        &self.activations
    }

    /// Activations of the last layer.
    pub fn output(&self) -> &Neurons {
        self.activations.last().expect("observation has no layers")
    }

    pub fn into_output(mut self) -> Neurons {
        self.activations.pop().expect("observation has no layers")
    }
}

impl Index<usize> for Observation {
    type Output = Neurons;

    fn index(&self, layer: usize) -> &Neurons {
        &self.activations[layer]
    }
}
