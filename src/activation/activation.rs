use serde::{Serialize, Deserialize};

use crate::math::neurons::Neurons;

/// Activation applied to a layer's pre-activation column.
///
/// Each variant pairs a vector-to-vector function with its derivative so the
/// two are always dispatched together. Derivatives are expressed in terms of
/// the **activated** value `a`, not the raw `z`; back-propagation relies on
/// this convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Linear,
    Sigmoid,
    /// Vector-valued; see [`ActivationFunction::derivative`] for the
    /// approximation used on the backward pass.
    Softmax,
    #[serde(rename = "relu")]
    ReLU,
    Tanh,
}

impl ActivationFunction {
    /// Applies the activation to a whole column.
    pub fn apply(&self, z: &Neurons) -> Neurons {
        match self {
            ActivationFunction::Linear => z.clone(),
            ActivationFunction::Sigmoid => z.map(sigmoid),
            ActivationFunction::Softmax => softmax(z),
            ActivationFunction::ReLU => z.map(|x| if x > 0.0 { x } else { 0.0 }),
            ActivationFunction::Tanh => z.map(f64::tanh),
        }
    }

    /// Derivative evaluated at the activated values `a`.
    ///
    /// `Softmax` uses the element-wise `a(1 - a)`, i.e. the diagonal of its
    /// Jacobian. The off-diagonal terms are dropped.
    pub fn derivative(&self, a: &Neurons) -> Neurons {
        match self {
            ActivationFunction::Linear => a.map(|_| 1.0),
            ActivationFunction::Sigmoid | ActivationFunction::Softmax => a.map(|x| x * (1.0 - x)),
            ActivationFunction::ReLU => a.map(|x| if x > 0.0 { 1.0 } else { 0.0 }),
            ActivationFunction::Tanh => a.map(|x| 1.0 - x * x),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Linear => "linear",
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Softmax => "softmax",
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Tanh => "tanh",
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(z: &Neurons) -> Neurons {
    if z.len() == 0 {
        return Neurons::default();
    }
    // Shifting by the max leaves the ratios unchanged and keeps exp() finite.
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&x| (x - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    Neurons::from(exps.into_iter().map(|e| e / total).collect::<Vec<_>>())
}
