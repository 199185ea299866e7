use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::loss::loss_type::LossType;
use crate::train::backprop::DeltaRule;

/// How a batch of samples becomes a single update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// Average the batch's inputs and expected outputs, then run one forward
    /// and backward pass on that averaged pair.
    #[default]
    AverageInputs,
    /// Back-propagate every sample and average the resulting gradients.
    AverageGradients,
}

/// Configuration for a training run.
///
/// # Fields
/// - `learning_rate`: gradient-descent step size
/// - `batch_size`: samples per update; use `1` for online training
/// - `loss`: loss function driving the output error
/// - `batch_mode`: see [`BatchMode`]
/// - `delta_rule`: see [`DeltaRule`]; leave at the default to train
/// - `shuffle`: visit samples in a fresh random order every epoch
/// - `max_epochs`: upper bound for [`train_until`](crate::train::loop_fn::train_until)
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub batch_size: usize,
    pub loss: LossType,
    pub batch_mode: BatchMode,
    pub delta_rule: DeltaRule,
    pub shuffle: bool,
    pub max_epochs: Option<usize>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: 0.1,
            batch_size: 1,
            loss: LossType::SquaredError,
            batch_mode: BatchMode::AverageInputs,
            delta_rule: DeltaRule::Activation,
            shuffle: false,
            max_epochs: None,
        }
    }
}

impl TrainConfig {
    pub fn new(learning_rate: f64, batch_size: usize, loss: LossType) -> Self {
        TrainConfig {
            learning_rate,
            batch_size,
            loss,
            ..TrainConfig::default()
        }
    }

    pub fn with_batch_mode(mut self, batch_mode: BatchMode) -> Self {
        self.batch_mode = batch_mode;
        self
    }

    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = Some(max_epochs);
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(NetworkError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetworkError::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<TrainConfig> {
        let config: TrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
