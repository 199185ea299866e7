use log::debug;
use rayon::prelude::*;

use crate::loss::loss_type::LossType;
use crate::math::neurons::Neurons;
use crate::math::ops;
use crate::network::network::Network;

/// Counts the samples for which `accept(input, prediction, expected)` holds.
/// Samples are evaluated in parallel.
///
/// # Panics
/// Panics if `inputs` and `outputs` differ in length.
pub fn test<I, O, F>(network: &Network, inputs: &[I], outputs: &[O], accept: F) -> usize
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
    F: Fn(&Neurons, &Neurons, &Neurons) -> bool + Sync,
{
    assert_eq!(inputs.len(), outputs.len(), "inputs and outputs must have equal length");
    let passed = inputs
        .par_iter()
        .zip(outputs.par_iter())
        .filter(|(input, expected)| {
            let input: &Neurons = input.as_ref();
            accept(input, &network.predict(input), expected.as_ref())
        })
        .count();
    debug!("{} of {} samples accepted", passed, inputs.len());
    passed
}

/// Fraction of samples whose strongest output neuron matches the strongest
/// expected neuron. An empty data set scores `0.0`.
pub fn accuracy<I, O>(network: &Network, inputs: &[I], outputs: &[O]) -> f64
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
{
    if inputs.is_empty() {
        return 0.0;
    }
    let correct = test(network, inputs, outputs, |_, prediction, expected| {
        ops::largest(prediction) == ops::largest(expected)
    });
    correct as f64 / inputs.len() as f64
}

/// Mean per-sample cost over a data set. An empty data set costs `0.0`.
pub fn dataset_cost<I, O>(network: &Network, inputs: &[I], outputs: &[O], loss: LossType) -> f64
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
{
    assert_eq!(inputs.len(), outputs.len(), "inputs and outputs must have equal length");
    if inputs.is_empty() {
        return 0.0;
    }
    let total: f64 = inputs
        .par_iter()
        .zip(outputs.par_iter())
        .map(|(input, expected)| loss.cost(&network.predict(input), expected.as_ref()))
        .sum();
    total / inputs.len() as f64
}
