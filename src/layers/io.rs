use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::math::neurons::Neurons;
use crate::math::ops;

/// Raw feature values presented to the network's first layer.
///
/// The input layer is always linear with a bias of 1.0; neither takes part in
/// any computation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Input {
    values: Neurons,
}

impl Input {
    /// `size` zero-valued features.
    pub fn new(size: usize) -> Input {
        Input { values: Neurons::new(size) }
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn neurons(&self) -> &Neurons {
        &self.values
    }

    pub fn neuron_mut(&mut self, i: usize) -> &mut f64 {
        self.values.value_mut(i)
    }

    pub fn activation(&self) -> ActivationFunction {
        ActivationFunction::Linear
    }

    pub fn bias(&self) -> f64 {
        1.0
    }
}

impl AsRef<Neurons> for Input {
    fn as_ref(&self) -> &Neurons {
        &self.values
    }
}

impl From<Vec<f64>> for Input {
    fn from(values: Vec<f64>) -> Self {
        Input { values: Neurons::from(values) }
    }
}

impl From<Neurons> for Input {
    fn from(values: Neurons) -> Self {
        Input { values }
    }
}

/// The network's last layer.
///
/// Describes the output layer when building a network (size, activation,
/// bias) and also serves as an expected or predicted output value, e.g. a
/// one-hot label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    values: Neurons,
    activation: ActivationFunction,
    bias: f64,
}

impl Output {
    /// Output layer description with `size` zeroed neurons.
    pub fn new(size: usize, activation: ActivationFunction, bias: f64) -> Output {
        Output {
            values: Neurons::new(size),
            activation,
            bias,
        }
    }

    /// One-hot label for `class` out of `count` classes.
    pub fn one_hot(class: usize, count: usize) -> Output {
        Output::from(Neurons::one_hot(class, count))
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn neurons(&self) -> &Neurons {
        &self.values
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Index of the strongest neuron, i.e. the decoded class.
    pub fn class(&self) -> usize {
        ops::largest(&self.values)
    }
}

impl AsRef<Neurons> for Output {
    fn as_ref(&self) -> &Neurons {
        &self.values
    }
}

/// Wraps label or prediction values. The layer fields fall back to a sigmoid
/// activation with bias 1.0; use [`Output::new`] to describe a layer.
impl From<Neurons> for Output {
    fn from(values: Neurons) -> Self {
        Output {
            values,
            activation: ActivationFunction::Sigmoid,
            bias: 1.0,
        }
    }
}

impl From<Vec<f64>> for Output {
    fn from(values: Vec<f64>) -> Self {
        Output::from(Neurons::from(values))
    }
}
