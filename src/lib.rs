pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use math::neurons::Neurons;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use layers::io::{Input, Output};
pub use network::builder::NetworkBuilder;
pub use network::network::Network;
pub use network::observation::Observation;
pub use network::spec::LayerSpec;
pub use loss::loss_type::LossType;
pub use optim::gradients::{LayerGradients, NetworkGradients};
pub use optim::sgd::Sgd;
pub use train::backprop::{back_propagate, back_propagate_error, compute_gradients, DeltaRule};
pub use train::trainer::train;
pub use train::loop_fn::{train_epoch, train_until};
pub use train::evaluate::{accuracy, dataset_cost, test};
pub use train::train_config::{BatchMode, TrainConfig};
pub use train::epoch_stats::{BatchStats, EpochStats};
pub use error::{NetworkError, Result};
