// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod worker;
pub mod processing;
pub mod store;
pub mod config;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{FolderTask, ImageTask, Job, JobStatus, JobSummary, ProgressTracker};
pub use crate::processing::{BatchConfig, BatchCoordinator, BatchSummary, FolderWorker};
pub use crate::store::{JsonFileStatusStore, MemoryStatusStore, StatusStore};
pub use crate::utils::{BatchError, BatchResult, ProcessingError, StoreError};
pub use crate::config::AppConfig;
pub use crate::commands::*;

// This library file is used as a public API for consuming this crate as a library.
// The actual application entry point is in main.rs.
