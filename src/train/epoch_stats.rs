use serde::{Serialize, Deserialize};

/// Emitted after every batch of [`train_epoch`](crate::train::loop_fn::train_epoch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// 0-based batch number within the epoch.
    pub batch: usize,
    /// Sample range `[start, end)` of this batch (positions in visiting order).
    pub start: usize,
    pub end: usize,
    /// Mean per-sample cost of the batch, measured before the update.
    pub cost: f64,
}

/// Emitted after every epoch of [`train_until`](crate::train::loop_fn::train_until).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Mean per-sample cost over all batches of this epoch.
    pub cost: f64,
    /// Number of batches (updates) performed.
    pub batches: usize,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
