pub mod backprop;
pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;
pub mod evaluate;

pub use backprop::{back_propagate, back_propagate_error, compute_gradients, DeltaRule};
pub use trainer::train;
pub use epoch_stats::{BatchStats, EpochStats};
pub use train_config::{BatchMode, TrainConfig};
pub use loop_fn::{train_epoch, train_until};
pub use evaluate::{accuracy, dataset_cost, test};
