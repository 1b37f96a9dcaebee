//! Core application types.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`Job`]: A client's job record as seen by the status store
//! - [`ImageTask`]: One source image and its two derivative destinations
//! - [`FolderTask`]: One input subfolder and its mirrored destinations
//! - [`ProgressTracker`]: Batch-wide success counter with checkpoint policy

mod types;
mod task;
mod progress;

pub use types::{DerivativeKind, Job, JobStatus, JobSummary};
pub use task::{FolderTask, ImageTask};
pub use progress::{DEFAULT_CHECKPOINT_INTERVAL, Progress, ProgressTracker};
