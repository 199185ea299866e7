use serde::{Serialize, Deserialize};

use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::loss::squared_error::SquaredErrorLoss;
use crate::math::neurons::Neurons;
use crate::math::ops;

/// Selects which loss function training uses.
///
/// - `SquaredError`: `0.5·(o - e)²`; pair with any output activation.
/// - `CrossEntropy`: binary cross-entropy per neuron; the output layer must
///   keep its values inside `(0, 1)` (sigmoid or softmax).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    SquaredError,
    CrossEntropy,
}

impl LossType {
    /// Per-neuron loss vector.
    pub fn loss(&self, output: &Neurons, expected: &Neurons) -> Neurons {
        check_lengths(output, expected);
        let values = match self {
            LossType::SquaredError => SquaredErrorLoss::loss(output.values(), expected.values()),
            LossType::CrossEntropy => CrossEntropyLoss::loss(output.values(), expected.values()),
        };
        Neurons::from(values)
    }

    /// Per-neuron derivative of the loss with respect to the output.
    pub fn derivative(&self, output: &Neurons, expected: &Neurons) -> Neurons {
        check_lengths(output, expected);
        let values = match self {
            LossType::SquaredError => SquaredErrorLoss::derivative(output.values(), expected.values()),
            LossType::CrossEntropy => CrossEntropyLoss::derivative(output.values(), expected.values()),
        };
        Neurons::from(values)
    }

    /// Network-level scalar cost: the mean of the per-neuron loss vector.
    pub fn cost(&self, output: &Neurons, expected: &Neurons) -> f64 {
        ops::mean(&self.loss(output, expected))
    }
}

fn check_lengths(output: &Neurons, expected: &Neurons) {
    assert_eq!(
        output.len(),
        expected.len(),
        "output has {} neurons but expected has {}",
        output.len(),
        expected.len()
    );
}
