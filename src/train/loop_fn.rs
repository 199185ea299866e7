use std::time::Instant;

use log::{debug, info};
use rand::seq::SliceRandom;

use crate::math::neurons::Neurons;
use crate::network::network::Network;
use crate::train::epoch_stats::{BatchStats, EpochStats};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_indices;

/// One pass over the data set in batches of `config.batch_size`.
///
/// `on_batch` runs after every update with the freshly updated network.
/// Returning `false` from it ends the epoch early; the network returned is
/// the one the callback last saw.
///
/// The last batch is shorter when the sample count is not a multiple of the
/// batch size.
///
/// # Panics
/// Panics if the data set is empty, if `inputs` and `outputs` differ in
/// length, or if `config.batch_size` is zero.
pub fn train_epoch<I, O, F>(
    network: &Network,
    inputs: &[I],
    outputs: &[O],
    config: &TrainConfig,
    on_batch: F,
) -> Network
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
    F: FnMut(&Network, &BatchStats) -> bool,
{
    run_epoch(network, inputs, outputs, config, 1, on_batch).0
}

/// Repeats epochs until `on_epoch` returns `false` or `config.max_epochs` is
/// reached, whichever comes first.
///
/// With `max_epochs` unset the callback alone decides when to stop.
pub fn train_until<I, O, F>(
    network: &Network,
    inputs: &[I],
    outputs: &[O],
    config: &TrainConfig,
    mut on_epoch: F,
) -> Network
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
    F: FnMut(&Network, &EpochStats) -> bool,
{
    let mut current = network.clone();
    let mut epoch = 0;

    loop {
        if config.max_epochs.is_some_and(|max| epoch >= max) {
            info!("stopping after {} epochs", epoch);
            break;
        }
        epoch += 1;

        let t_start = Instant::now();
        let (next, cost, batches) = run_epoch(&current, inputs, outputs, config, epoch, |_, _| true);
        current = next;

        let stats = EpochStats {
            epoch,
            cost,
            batches,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "epoch {}: cost {:.6} over {} batches in {} ms",
            stats.epoch, stats.cost, stats.batches, stats.elapsed_ms
        );

        if !on_epoch(&current, &stats) {
            break;
        }
    }

    current
}

/// Returns the updated network, the sample-weighted mean batch cost and the
/// number of batches run.
fn run_epoch<I, O, F>(
    network: &Network,
    inputs: &[I],
    outputs: &[O],
    config: &TrainConfig,
    epoch: usize,
    mut on_batch: F,
) -> (Network, f64, usize)
where
    I: AsRef<Neurons> + Sync,
    O: AsRef<Neurons> + Sync,
    F: FnMut(&Network, &BatchStats) -> bool,
{
    assert!(!inputs.is_empty(), "training data must not be empty");
    assert_eq!(inputs.len(), outputs.len(), "inputs and outputs must have equal length");
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    let n = inputs.len();
    let mut order: Vec<usize> = (0..n).collect();
    if config.shuffle {
        order.shuffle(&mut rand::thread_rng());
    }

    let mut current = network.clone();
    let mut weighted_cost = 0.0;
    let mut seen = 0;
    let mut batches = 0;

    for (batch, start) in (0..n).step_by(config.batch_size).enumerate() {
        let end = (start + config.batch_size).min(n);
        let (next, cost) = train_indices(&current, inputs, outputs, config, &order[start..end]);
        current = next;

        weighted_cost += cost * (end - start) as f64;
        seen += end - start;
        batches += 1;

        let stats = BatchStats { epoch, batch, start, end, cost };
        debug!("epoch {} batch {} [{}, {}): cost {:.6}", epoch, batch, start, end, cost);
        if !on_batch(&current, &stats) {
            break;
        }
    }

    (current, weighted_cost / seen as f64, batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::loss::loss_type::LossType;
    use crate::network::builder::NetworkBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn network() -> Network {
        let mut net = NetworkBuilder::new()
            .input(2)
            .hidden(2, ActivationFunction::Sigmoid, 1.0)
            .output(1, ActivationFunction::Sigmoid, 1.0)
            .build()
            .unwrap();
        net.reset_with(&mut StdRng::seed_from_u64(11));
        net
    }

    fn samples() -> (Vec<Neurons>, Vec<Neurons>) {
        let inputs = (0..5).map(|i| Neurons::from(vec![i as f64 / 5.0, 1.0])).collect();
        let outputs = (0..5).map(|i| Neurons::from(vec![(i % 2) as f64])).collect();
        (inputs, outputs)
    }

    #[test]
    fn epoch_visits_every_batch_with_a_short_tail() {
        let (inputs, outputs) = samples();
        let config = TrainConfig::new(0.5, 2, LossType::SquaredError);
        let mut seen = Vec::new();
        train_epoch(&network(), &inputs, &outputs, &config, |_, stats| {
            seen.push((stats.batch, stats.start, stats.end));
            true
        });
        assert_eq!(seen, vec![(0, 0, 2), (1, 2, 4), (2, 4, 5)]);
    }

    #[test]
    fn returning_false_stops_the_epoch() {
        let (inputs, outputs) = samples();
        let config = TrainConfig::new(0.5, 1, LossType::SquaredError);
        let mut calls = 0;
        let mut last = None;
        let trained = train_epoch(&network(), &inputs, &outputs, &config, |net, _| {
            calls += 1;
            last = Some(net.clone());
            calls < 2
        });
        assert_eq!(calls, 2);
        assert_eq!(Some(trained), last);
    }

    #[test]
    fn max_epochs_bounds_the_run() {
        let (inputs, outputs) = samples();
        let config = TrainConfig::new(0.5, 5, LossType::SquaredError).with_max_epochs(3);
        let mut epochs = Vec::new();
        train_until(&network(), &inputs, &outputs, &config, |_, stats| {
            epochs.push((stats.epoch, stats.batches));
            true
        });
        assert_eq!(epochs, vec![(1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn callback_can_stop_before_max_epochs() {
        let (inputs, outputs) = samples();
        let config = TrainConfig::new(0.5, 1, LossType::SquaredError).with_max_epochs(100);
        let mut epochs = 0;
        train_until(&network(), &inputs, &outputs, &config, |_, stats| {
            epochs = stats.epoch;
            stats.epoch < 4
        });
        assert_eq!(epochs, 4);
    }

    #[test]
    fn zero_max_epochs_returns_the_input_network() {
        let (inputs, outputs) = samples();
        let net = network();
        let config = TrainConfig::default().with_max_epochs(0);
        let trained = train_until(&net, &inputs, &outputs, &config, |_, _| panic!("no epoch should run"));
        assert_eq!(trained, net);
    }

    #[test]
    fn shuffled_epochs_still_cover_all_samples() {
        let (inputs, outputs) = samples();
        let config = TrainConfig::new(0.5, 2, LossType::SquaredError).with_shuffle(true);
        let mut covered = 0;
        train_epoch(&network(), &inputs, &outputs, &config, |_, stats| {
            covered += stats.end - stats.start;
            true
        });
        assert_eq!(covered, 5);
    }

    #[test]
    #[should_panic]
    fn empty_data_set_panics() {
        let empty: Vec<Neurons> = Vec::new();
        train_epoch(&network(), &empty, &empty, &TrainConfig::default(), |_, _| true);
    }
}
