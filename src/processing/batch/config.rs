use serde::{Serialize, Deserialize};
use crate::core::DEFAULT_CHECKPOINT_INTERVAL;
use crate::processing::resize::{FINAL_WIDTH, THUMBNAIL_WIDTH};
use crate::worker::DEFAULT_WORKERS;

/// Tunables for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Parallel workers per folder
    pub workers: usize,
    /// Successful files between status checkpoints
    pub checkpoint_interval: usize,
    pub final_width: u32,
    pub thumbnail_width: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            final_width: FINAL_WIDTH,
            thumbnail_width: THUMBNAIL_WIDTH,
        }
    }
}
