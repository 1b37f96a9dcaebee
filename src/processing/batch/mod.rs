mod config;
mod folder;
mod processor;

pub use config::BatchConfig;
pub use folder::{CheckpointSink, FolderOutcome, FolderWorker};
pub use processor::{BatchCoordinator, BatchSummary, StoreCheckpoint};
