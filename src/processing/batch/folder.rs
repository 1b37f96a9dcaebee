use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::core::{FolderTask, ProgressTracker};
use crate::processing::executor::DerivativeProcessor;
use crate::utils::{BatchError, BatchResult, ProcessingResult, ensure_dir, list_eligible_files};
use crate::worker::WorkerPool;

/// Receives the global processed count each time it lands on a checkpoint boundary.
#[async_trait]
pub trait CheckpointSink: Send + Sync {
    async fn checkpoint(&self, processed_files: usize);
}

/// Per-folder success and failure counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

/// Processes the eligible images of one folder on a bounded worker pool.
#[derive(Clone)]
pub struct FolderWorker {
    processor: Arc<dyn DerivativeProcessor>,
    workers: usize,
}

impl FolderWorker {
    pub fn new(processor: Arc<dyn DerivativeProcessor>, workers: usize) -> Self {
        Self { processor, workers }
    }

    /// Enumerates `folder` and processes it into the mirrored destinations.
    pub async fn process_folder(
        &self,
        folder: &Path,
        final_root: &Path,
        thumbnail_root: &Path,
        progress: &ProgressTracker,
        checkpoint: &dyn CheckpointSink,
    ) -> BatchResult<FolderOutcome> {
        let files = list_eligible_files(folder)
            .await
            .map_err(|e| BatchError::io(folder, e))?;
        let task = FolderTask::new(folder, final_root, thumbnail_root, files);
        self.process_task(task, progress, checkpoint).await
    }

    /// Processes an already discovered folder.
    ///
    /// Returns only after every dispatched unit has completed. Per-file errors
    /// are counted as failures and never returned; only failing to create the
    /// destination directories is an error.
    pub async fn process_task(
        &self,
        folder: FolderTask,
        progress: &ProgressTracker,
        checkpoint: &dyn CheckpointSink,
    ) -> BatchResult<FolderOutcome> {
        let source = folder.source.clone();

        for dir in [&folder.final_dir, &folder.thumbnail_dir] {
            ensure_dir(dir).await.map_err(|e| BatchError::io(dir, e))?;
        }

        if folder.files.is_empty() {
            info!("No files to process in {}.", source.display());
            return Ok(FolderOutcome::default());
        }

        let mut pool: WorkerPool<(PathBuf, ProcessingResult<()>)> =
            WorkerPool::new(Some(self.workers));

        let tasks = folder.into_image_tasks();
        debug!("Dispatching {} files from {}", tasks.len(), source.display());

        for task in tasks {
            let processor = Arc::clone(&self.processor);
            pool.submit(move || {
                let result = processor.process(&task);
                (task.input_path, result)
            });
        }

        let mut outcome = FolderOutcome::default();

        while let Some(completed) = pool.next_completed().await {
            match completed {
                Ok((_, Ok(()))) => {
                    outcome.succeeded += 1;
                    let processed = progress.increment();
                    if progress.is_checkpoint(processed) {
                        checkpoint.checkpoint(processed).await;
                    }
                }
                Ok((path, Err(e))) => {
                    outcome.failed += 1;
                    error!("Failed to process {}: {}", path.display(), e);
                }
                Err(e) => {
                    outcome.failed += 1;
                    error!("Failed to process file in {}: {}", source.display(), e);
                }
            }
        }

        info!(
            "Completed processing in {} ({} succeeded, {} failed).",
            source.display(),
            outcome.succeeded,
            outcome.failed
        );

        Ok(outcome)
    }
}
