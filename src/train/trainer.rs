use log::debug;
use rayon::prelude::*;

use crate::math::matrix::Matrix;
use crate::math::neurons::Neurons;
use crate::math::ops;
use crate::network::network::Network;
use crate::optim::gradients::NetworkGradients;
use crate::optim::sgd::Sgd;
use crate::train::backprop::{back_propagate_error, compute_gradients};
use crate::train::train_config::{BatchMode, TrainConfig};

/// Trains on the samples `batch_start..batch_end` and returns the updated
/// network together with the batch's mean per-sample cost (measured with the
/// network as passed in).
///
/// Samples are evaluated in parallel. Sums are reduced in an order that may
/// vary between runs, so results can differ in the last bits.
///
/// # Panics
/// Panics if `inputs` and `outputs` differ in length, if the range is empty or
/// out of bounds, or if a sample does not fit the network.
pub fn train<I, O>(
    network: &Network,
    inputs: &[I],
    outputs: &[O],
    config: &TrainConfig,
    batch_start: usize,
    batch_end: usize,
) -> (Network, f64)
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
{
    assert_eq!(inputs.len(), outputs.len(), "inputs and outputs must have equal length");
    assert!(
        batch_start < batch_end && batch_end <= inputs.len(),
        "batch {}..{} is not a non-empty range within {} samples",
        batch_start,
        batch_end,
        inputs.len()
    );
    let indices: Vec<usize> = (batch_start..batch_end).collect();
    train_indices(network, inputs, outputs, config, &indices)
}

/// Trains on an arbitrary set of sample indices.
pub(crate) fn train_indices<I, O>(
    network: &Network,
    inputs: &[I],
    outputs: &[O],
    config: &TrainConfig,
    indices: &[usize],
) -> (Network, f64)
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
{
    let (updated, cost) = match config.batch_mode {
        BatchMode::AverageInputs => average_inputs(network, inputs, outputs, config, indices),
        BatchMode::AverageGradients => average_gradients(network, inputs, outputs, config, indices),
    };
    debug!("trained batch of {} samples, cost {:.6}", indices.len(), cost);
    (updated, cost)
}

fn average_inputs<I, O>(
    network: &Network,
    inputs: &[I],
    outputs: &[O],
    config: &TrainConfig,
    indices: &[usize],
) -> (Network, f64)
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
{
    let inv_batch = 1.0 / indices.len() as f64;
    let zeros = || {
        (
            Matrix::zeros(network.input_size(), 1),
            Matrix::zeros(network.output_size(), 1),
        )
    };

    let (input_sum, expected_sum) = indices
        .par_iter()
        .map(|&i| (inputs[i].as_ref().as_matrix().clone(), outputs[i].as_ref().as_matrix().clone()))
        .reduce(zeros, |(xa, ya), (xb, yb)| (ops::add(&xa, &xb), ops::add(&ya, &yb)));

    let input = Neurons::from_matrix(ops::scale(&input_sum, inv_batch));
    let expected = Neurons::from_matrix(ops::scale(&expected_sum, inv_batch));

    let cost = batch_cost(network, inputs, outputs, config, indices);

    let observation = network.observe(&input);
    let error = config.loss.derivative(observation.output(), &expected);
    let updated = back_propagate_error(network, &observation, &error, config.learning_rate, config.delta_rule);
    (updated, cost)
}

fn average_gradients<I, O>(
    network: &Network,
    inputs: &[I],
    outputs: &[O],
    config: &TrainConfig,
    indices: &[usize],
) -> (Network, f64)
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
{
    let inv_batch = 1.0 / indices.len() as f64;

    let (gradient_sum, cost_sum) = indices
        .par_iter()
        .map(|&i| {
            let expected = outputs[i].as_ref();
            let observation = network.observe(&inputs[i]);
            let cost = config.loss.cost(observation.output(), expected);
            let error = config.loss.derivative(observation.output(), expected);
            (compute_gradients(network, &observation, &error, config.delta_rule), cost)
        })
        .reduce(
            || (NetworkGradients::zeros_like(network), 0.0),
            |(ga, ca), (gb, cb)| (ga.add(&gb), ca + cb),
        );

    let updated = Sgd::new(config.learning_rate).apply(network, &gradient_sum.scale(inv_batch));
    (updated, cost_sum * inv_batch)
}

fn batch_cost<I, O>(
    network: &Network,
    inputs: &[I],
    outputs: &[O],
    config: &TrainConfig,
    indices: &[usize],
) -> f64
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
{
    let total: f64 = indices
        .par_iter()
        .map(|&i| config.loss.cost(&network.predict(&inputs[i]), outputs[i].as_ref()))
        .sum();
    total / indices.len() as f64
}
