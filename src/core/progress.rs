use std::sync::atomic::{AtomicUsize, Ordering};

/// Reference checkpoint interval: one status update per 200 successes.
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 200;

/// Batch-wide count of successfully processed files.
///
/// Scoped to one batch run. The checkpoint decision is derived from the value
/// returned by [`ProgressTracker::increment`], never from a separate read, so
/// each multiple of the interval is observed by exactly one caller.
#[derive(Debug)]
pub struct ProgressTracker {
    processed: AtomicUsize,
    interval: usize,
}

impl ProgressTracker {
    pub fn new(interval: usize) -> Self {
        Self {
            processed: AtomicUsize::new(0),
            interval: interval.max(1),
        }
    }

    /// Records one success and returns the new count.
    pub fn increment(&self) -> usize {
        self.processed.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn is_checkpoint(&self, value: usize) -> bool {
        value != 0 && value % self.interval == 0
    }

    pub fn current(&self) -> usize {
        self.processed.load(Ordering::Acquire)
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CHECKPOINT_INTERVAL)
    }
}

/// Snapshot used for progress log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed_files: usize,
    pub total_files: usize,
    /// Progress percentage (0-100)
    pub progress_percentage: usize,
}

impl Progress {
    pub fn new(processed_files: usize, total_files: usize) -> Self {
        let progress_percentage = if total_files > 0 {
            (processed_files * 100) / total_files
        } else {
            0
        };

        Self {
            processed_files,
            total_files,
            progress_percentage,
        }
    }
}
