use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::{DerivativeKind, FolderTask, Progress, ProgressTracker};
use crate::processing::executor::{DerivativeProcessor, DerivativeWriter};
use crate::store::StatusStore;
use crate::utils::{BatchError, BatchResult, ensure_dir, list_eligible_files, list_subfolders};

use super::config::BatchConfig;
use super::folder::{CheckpointSink, FolderWorker};

/// Outcome of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub client_id: String,
    /// Eligible files discovered before processing started
    pub total_files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub folders: usize,
    pub elapsed: Duration,
}

/// Forwards checkpoints to the status store. Failures are logged, not raised.
pub struct StoreCheckpoint<'a> {
    store: &'a dyn StatusStore,
    client_id: &'a str,
    total_files: usize,
}

impl<'a> StoreCheckpoint<'a> {
    pub fn new(store: &'a dyn StatusStore, client_id: &'a str, total_files: usize) -> Self {
        Self {
            store,
            client_id,
            total_files,
        }
    }
}

#[async_trait]
impl<'a> CheckpointSink for StoreCheckpoint<'a> {
    async fn checkpoint(&self, processed_files: usize) {
        let progress = Progress::new(processed_files, self.total_files);
        info!(
            "Processed {}/{} files ({}% complete).",
            progress.processed_files, progress.total_files, progress.progress_percentage
        );

        if let Err(e) = self
            .store
            .update_status(self.client_id, self.total_files, processed_files)
            .await
        {
            warn!("Checkpoint at {} files not recorded: {}", processed_files, e);
        }
    }
}

/// Drives a client's input tree folder by folder.
pub struct BatchCoordinator {
    config: BatchConfig,
    worker: FolderWorker,
}

impl BatchCoordinator {
    pub fn new(config: BatchConfig) -> Self {
        let processor = Arc::new(DerivativeWriter::from_config(&config));
        Self::with_processor(config, processor)
    }

    /// Uses `processor` for the per-file work instead of [`DerivativeWriter`].
    pub fn with_processor(config: BatchConfig, processor: Arc<dyn DerivativeProcessor>) -> Self {
        let worker = FolderWorker::new(processor, config.workers);
        Self { config, worker }
    }

    /// Processes every subfolder of `input_root` into `output_root`.
    ///
    /// `total_files` is computed once before any work starts. The store is
    /// told the job is processing before the first file, and finalized with
    /// the success count after the last folder drains. A structural failure
    /// (missing input root, unreadable listing) aborts without finalizing.
    pub async fn run_batch(
        &self,
        input_root: &Path,
        output_root: &Path,
        client_id: &str,
        store: &dyn StatusStore,
    ) -> BatchResult<BatchSummary> {
        let started = Instant::now();

        let final_root = output_root.join(DerivativeKind::Final.dir_name());
        let thumbnail_root = output_root.join(DerivativeKind::Thumbnail.dir_name());
        for dir in [&final_root, &thumbnail_root] {
            ensure_dir(dir).await.map_err(|e| BatchError::io(dir, e))?;
        }

        let folders = list_subfolders(input_root)
            .await
            .map_err(|e| BatchError::io(input_root, e))?;

        let mut summary = BatchSummary {
            client_id: client_id.to_string(),
            total_files: 0,
            succeeded: 0,
            failed: 0,
            folders: folders.len(),
            elapsed: Duration::ZERO,
        };

        if folders.is_empty() {
            info!("No folders found in {} to process.", input_root.display());
            summary.elapsed = started.elapsed();
            return Ok(summary);
        }

        let mut tasks = Vec::with_capacity(folders.len());
        for folder in folders {
            let files = list_eligible_files(&folder)
                .await
                .map_err(|e| BatchError::io(&folder, e))?;
            tasks.push(FolderTask::new(folder, &final_root, &thumbnail_root, files));
        }

        summary.total_files = tasks.iter().map(|task| task.files.len()).sum();
        info!("Total files to process across all folders: {}", summary.total_files);

        let progress = ProgressTracker::new(self.config.checkpoint_interval);
        store.update_status(client_id, summary.total_files, 0).await?;

        let checkpoint = StoreCheckpoint::new(store, client_id, summary.total_files);
        for task in tasks {
            info!("Processing folder: {}", task.name());
            let outcome = self.worker.process_task(task, &progress, &checkpoint).await?;
            summary.succeeded += outcome.succeeded;
            summary.failed += outcome.failed;
        }

        let processed_files = progress.current();
        store.finalize(client_id, processed_files).await?;

        summary.elapsed = started.elapsed();
        if summary.failed > 0 {
            warn!(
                "Batch for clientId {} completed with {} failed files out of {}",
                client_id, summary.failed, summary.total_files
            );
        } else {
            info!("All files have been processed successfully and status updated.");
        }

        Ok(summary)
    }
}

impl Default for BatchCoordinator {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}
