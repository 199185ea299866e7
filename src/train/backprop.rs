use log::trace;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::loss::loss_type::LossType;
use crate::math::neurons::Neurons;
use crate::math::ops;
use crate::network::network::Network;
use crate::network::observation::Observation;
use crate::optim::gradients::NetworkGradients;
use crate::optim::sgd::Sgd;

/// Where the activation derivative is evaluated when forming a layer's local
/// gradient `delta = dOutput ⊙ f'(·)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaRule {
    /// `f'` evaluated at the layer's activations: standard back-propagation.
    #[default]
    Activation,
    /// `f'` evaluated at the incoming gradient `dOutput` itself.
    ///
    /// Reproduces the figures of the classic "backpropagation example with
    /// numbers" walkthrough that the engine was first checked against. It
    /// flips the sign of negative errors and cannot be used for training.
    Gradient,
}

/// Per-layer gradients for one observation.
///
/// `error` is the loss derivative with respect to the output activations.
/// All gradients are computed from the weights of `network` as given; none
/// are updated along the way.
///
/// # Panics
/// Panics if `observation` was not produced by a network of the same depth,
/// or if `error` does not match the output layer size.
pub fn compute_gradients(
    network: &Network,
    observation: &Observation,
    error: &Neurons,
    rule: DeltaRule,
) -> NetworkGradients {
    assert_eq!(
        observation.len(),
        network.len(),
        "observation has {} layers but the network has {}",
        observation.len(),
        network.len()
    );
    assert_eq!(
        error.len(),
        network.output_size(),
        "error has {} values but the output layer has {} neurons",
        error.len(),
        network.output_size()
    );

    let mut gradients = Vec::with_capacity(network.len() - 1);
    let mut d_output = error.clone();

    for l in (1..network.len()).rev() {
        let layer = &network[l];
        let delta = local_gradient(layer.activation(), &d_output, observation.activation(l), rule);
        gradients.push(layer.compute_gradients(&delta, observation.activation(l - 1)));

        if l > 1 {
            d_output = layer.propagate(&delta);
        }
    }

    gradients.reverse();
    NetworkGradients::new(gradients)
}

/// One gradient-descent step from a precomputed output error.
/// Returns the updated network; `network` itself is left untouched.
pub fn back_propagate_error(
    network: &Network,
    observation: &Observation,
    error: &Neurons,
    learning_rate: f64,
    rule: DeltaRule,
) -> Network {
    let gradients = compute_gradients(network, observation, error, rule);
    trace!(
        "back-propagated {} layers, output bias gradient {:.6}",
        gradients.len(),
        gradients.layer(network.len() - 1).bias
    );
    Sgd::new(learning_rate).apply(network, &gradients)
}

/// One gradient-descent step towards `expected` under `loss`.
///
/// Uses [`DeltaRule::Activation`]. The figures of the published
/// "backpropagation example with numbers" walkthrough come out of
/// [`back_propagate_error`] with [`DeltaRule::Gradient`] instead.
pub fn back_propagate(
    network: &Network,
    observation: &Observation,
    expected: &Neurons,
    loss: LossType,
    learning_rate: f64,
) -> Network {
    let error = loss.derivative(observation.output(), expected);
    back_propagate_error(network, observation, &error, learning_rate, DeltaRule::Activation)
}

fn local_gradient(
    activation: ActivationFunction,
    d_output: &Neurons,
    a: &Neurons,
    rule: DeltaRule,
) -> Neurons {
    let slope = match rule {
        DeltaRule::Activation => activation.derivative(a),
        DeltaRule::Gradient => activation.derivative(d_output),
    };
    Neurons::from_matrix(ops::hadamard(d_output, &slope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::io::{Input, Output};
    use crate::math::matrix::Matrix;
    use crate::network::spec::LayerSpec;
    use approx::assert_relative_eq;

    fn sigmoid_net(w1: &[f64], w2: &[f64]) -> Network {
        let hidden = [LayerSpec::new(2, ActivationFunction::Sigmoid, 0.5)];
        let output = Output::new(2, ActivationFunction::Sigmoid, 0.5);
        let mut net = Network::new(&Input::new(2), &hidden, &output).unwrap();
        *net[1].weights_mut() = Matrix::from_vec(w1.to_vec(), 2);
        *net[2].weights_mut() = Matrix::from_vec(w2.to_vec(), 2);
        net
    }

    #[test]
    fn gradients_match_finite_differences() {
        let net = sigmoid_net(&[0.15, 0.25, 0.2, 0.3], &[0.4, 0.5, 0.45, 0.55]);
        let input = Neurons::from(vec![0.05, 0.1]);
        let expected = Neurons::from(vec![0.01, 0.99]);
        let loss = LossType::SquaredError;

        let observation = net.observe(&input);
        let error = loss.derivative(observation.output(), &expected);
        let gradients = compute_gradients(&net, &observation, &error, DeltaRule::Activation);

        // Cost summed over output neurons so its gradient matches `error`.
        let total = |n: &Network| ops::sum(&loss.loss(&n.predict(&input), &expected));
        let h = 1e-6;
        for l in 1..net.len() {
            for i in 0..net[l].size() {
                for j in 0..net[l].input_size() {
                    let mut plus = net.clone();
                    *plus[l].weight_mut(i, j) += h;
                    let mut minus = net.clone();
                    *minus[l].weight_mut(i, j) -= h;
                    let numeric = (total(&plus) - total(&minus)) / (2.0 * h);
                    let analytic = gradients.layer(l).weights.value(i, j);
                    assert_relative_eq!(analytic, numeric, epsilon = 1e-8);
                }
            }
        }
    }

    #[test]
    fn input_layer_is_never_updated() {
        let mut net = sigmoid_net(&[0.1, 0.2, 0.3, 0.4], &[0.5, 0.6, 0.7, 0.8]);
        *net[0].weights_mut() = Matrix::from_vec(vec![9.0, 9.0], 1);
        let observation = net.observe(Neurons::from(vec![1.0, 0.0]));
        let updated = back_propagate(&net, &observation, &Neurons::from(vec![0.0, 1.0]), LossType::SquaredError, 0.5);
        assert_eq!(updated[0], net[0]);
        assert_ne!(updated[2], net[2]);
    }

    #[test]
    fn back_propagation_reduces_the_cost() {
        let net = sigmoid_net(&[0.15, 0.25, 0.2, 0.3], &[0.4, 0.5, 0.45, 0.55]);
        let input = Neurons::from(vec![0.05, 0.1]);
        let expected = Neurons::from(vec![0.01, 0.99]);

        let before = LossType::SquaredError.cost(&net.predict(&input), &expected);
        let observation = net.observe(&input);
        let updated = back_propagate(&net, &observation, &expected, LossType::SquaredError, 0.5);
        let after = LossType::SquaredError.cost(&updated.predict(&input), &expected);
        assert!(after < before);
    }

    #[test]
    #[should_panic]
    fn observation_from_another_network_is_rejected() {
        let net = sigmoid_net(&[0.1; 4], &[0.1; 4]);
        let shallow = Network::new(&Input::new(2), &[], &Output::new(2, ActivationFunction::Sigmoid, 0.5)).unwrap();
        let observation = shallow.observe(Neurons::new(2));
        compute_gradients(&net, &observation, &Neurons::new(2), DeltaRule::Activation);
    }

    #[test]
    #[should_panic]
    fn error_of_the_wrong_length_is_rejected() {
        let net = sigmoid_net(&[0.1; 4], &[0.1; 4]);
        let observation = net.observe(Neurons::new(2));
        compute_gradients(&net, &observation, &Neurons::new(3), DeltaRule::Activation);
    }
}
