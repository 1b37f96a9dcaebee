use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::core::{Job, JobStatus, JobSummary};
use crate::utils::StoreResult;

use super::{StatusStore, apply_finalize, apply_status_update, find_startable, find_with_status};

/// One write issued against the store, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    Progress {
        client_id: String,
        total_files: usize,
        processed_files: usize,
    },
    Finalized {
        client_id: String,
        processed_files: usize,
    },
}

/// In-process status store.
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    jobs: Mutex<Vec<Job>>,
    updates: Mutex<Vec<StatusUpdate>>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub async fn job(&self, client_id: &str) -> Option<Job> {
        self.jobs
            .lock()
            .await
            .iter()
            .find(|job| job.client_id == client_id)
            .cloned()
    }

    /// Every update call so far, including ones that matched no record.
    pub async fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().await.clone()
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn find_startable_job(&self, client_id: &str) -> StoreResult<Option<JobSummary>> {
        Ok(find_startable(&self.jobs.lock().await, client_id))
    }

    async fn find_processing_job(&self) -> StoreResult<Option<JobSummary>> {
        Ok(find_with_status(&self.jobs.lock().await, JobStatus::Processing))
    }

    async fn update_status(
        &self,
        client_id: &str,
        total_files: usize,
        processed_files: usize,
    ) -> StoreResult<()> {
        self.updates.lock().await.push(StatusUpdate::Progress {
            client_id: client_id.to_string(),
            total_files,
            processed_files,
        });

        let mut jobs = self.jobs.lock().await;
        if !apply_status_update(&mut jobs, client_id, total_files, processed_files) {
            warn!("No documents were updated for clientId {}.", client_id);
        }
        Ok(())
    }

    async fn finalize(&self, client_id: &str, processed_files: usize) -> StoreResult<()> {
        self.updates.lock().await.push(StatusUpdate::Finalized {
            client_id: client_id.to_string(),
            processed_files,
        });

        let mut jobs = self.jobs.lock().await;
        if !apply_finalize(&mut jobs, client_id, processed_files) {
            warn!("No documents were finalized for clientId {}.", client_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn only_queued_jobs_are_startable() {
        let mut busy = Job::queued("C2");
        busy.status = JobStatus::Processing;
        let store = MemoryStatusStore::with_jobs(vec![Job::queued("C1"), busy]);

        assert_eq!(
            store.find_startable_job("C1").await.unwrap(),
            Some(JobSummary { client_id: "C1".to_string() })
        );
        assert_eq!(store.find_startable_job("C2").await.unwrap(), None);
        assert_eq!(store.find_startable_job("C3").await.unwrap(), None);
        assert_eq!(
            store.find_processing_job().await.unwrap(),
            Some(JobSummary { client_id: "C2".to_string() })
        );
    }

    #[tokio::test]
    async fn updates_then_finalizes_the_record() {
        let store = MemoryStatusStore::with_jobs(vec![Job::queued("C1")]);

        store.update_status("C1", 5, 0).await.unwrap();
        let job = store.job("C1").await.unwrap();
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!((job.total_files, job.processed_files), (5, 0));

        store.finalize("C1", 4).await.unwrap();
        let job = store.job("C1").await.unwrap();
        assert_eq!(job.status, JobStatus::CdnQueued);
        assert_eq!((job.total_files, job.processed_files), (5, 4));
        assert!(store.find_startable_job("C1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unmatched_updates_are_not_errors() {
        let store = MemoryStatusStore::new();

        store.update_status("ghost", 1, 0).await.unwrap();
        store.finalize("ghost", 0).await.unwrap();

        assert!(store.job("ghost").await.is_none());
        assert_eq!(store.updates().await.len(), 2);
    }
}
