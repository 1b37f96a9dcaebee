use std::path::{Path, PathBuf};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::core::{Job, JobStatus, JobSummary};
use crate::utils::StoreResult;

use super::{StatusStore, apply_finalize, apply_status_update, find_startable, find_with_status};

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct JobDocument {
    #[serde(default)]
    jobs: Vec<Job>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// Status store persisted as a single JSON document.
///
/// Every operation is a read-modify-write of the whole document under one
/// lock. A missing file reads as an empty store.
#[derive(Debug)]
pub struct JsonFileStatusStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<JobDocument> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Status file {} not found, starting empty", self.path.display());
                Ok(JobDocument::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes to a sibling temp file, then renames over the original.
    async fn save(&self, document: &JobDocument) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StatusStore for JsonFileStatusStore {
    async fn find_startable_job(&self, client_id: &str) -> StoreResult<Option<JobSummary>> {
        let _guard = self.lock.lock().await;
        Ok(find_startable(&self.load().await?.jobs, client_id))
    }

    async fn find_processing_job(&self) -> StoreResult<Option<JobSummary>> {
        let _guard = self.lock.lock().await;
        Ok(find_with_status(&self.load().await?.jobs, JobStatus::Processing))
    }

    async fn update_status(
        &self,
        client_id: &str,
        total_files: usize,
        processed_files: usize,
    ) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;

        if apply_status_update(&mut document.jobs, client_id, total_files, processed_files) {
            self.save(&document).await?;
        } else {
            warn!("No documents were updated for clientId {}.", client_id);
        }
        Ok(())
    }

    async fn finalize(&self, client_id: &str, processed_files: usize) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;

        if apply_finalize(&mut document.jobs, client_id, processed_files) {
            self.save(&document).await?;
        } else {
            warn!("No documents were finalized for clientId {}.", client_id);
        }
        Ok(())
    }
}
