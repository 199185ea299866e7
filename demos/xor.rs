use feedforward_nn::{
    train_until, ActivationFunction, LossType, NetworkBuilder, Neurons, TrainConfig,
};
use log::info;

fn main() -> feedforward_nn::Result<()> {
    env_logger::init();

    let mut network = NetworkBuilder::new()
        .input(2)
        .hidden(2, ActivationFunction::Sigmoid, 1.0)
        .output(1, ActivationFunction::Sigmoid, 1.0)
        .build()?;
    network.reset();

    let inputs: Vec<Neurons> = vec![
        vec![1.0, 0.0].into(),
        vec![1.0, 1.0].into(),
        vec![0.0, 1.0].into(),
        vec![0.0, 0.0].into(),
    ];
    let expected_outputs: Vec<Neurons> = vec![
        vec![1.0].into(),
        vec![0.0].into(),
        vec![1.0].into(),
        vec![0.0].into(),
    ];

    let config = TrainConfig::new(1.0, 1, LossType::SquaredError).with_max_epochs(10_000);
    config.validate()?;

    let network = train_until(&network, &inputs, &expected_outputs, &config, |_, stats| {
        if stats.epoch % 1000 == 0 {
            info!("epoch {}: cost = {:.6}", stats.epoch, stats.cost);
        }
        stats.cost > 1e-4
    });

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input.to_vec(), network.predict(input)[0]);
    }
    let correct = feedforward_nn::test(&network, &inputs, &expected_outputs, |_, output, expected| {
        (output[0] > 0.5) == (expected[0] > 0.5)
    });
    println!("{} of {} correct", correct, inputs.len());
    Ok(())
}
