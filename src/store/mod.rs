//! Status store collaborator.
//!
//! The batch reads a client's job record once (to decide whether to start)
//! and then writes it repeatedly: at start, at each checkpoint and on
//! finalize. Updates that match no record are logged and ignored.
//!
//! - [`MemoryStatusStore`]: in-process store that also records every update
//! - [`JsonFileStatusStore`]: jobs persisted to a JSON document on disk

mod json;
mod memory;

use async_trait::async_trait;
use crate::core::{Job, JobStatus, JobSummary};
use crate::utils::StoreResult;

pub use json::JsonFileStatusStore;
pub use memory::{MemoryStatusStore, StatusUpdate};

#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Job for `client_id` that is ready to start (status `queued`).
    async fn find_startable_job(&self, client_id: &str) -> StoreResult<Option<JobSummary>>;

    /// Any job currently being processed.
    async fn find_processing_job(&self) -> StoreResult<Option<JobSummary>>;

    /// Marks the job `processing` and records both counts.
    async fn update_status(
        &self,
        client_id: &str,
        total_files: usize,
        processed_files: usize,
    ) -> StoreResult<()>;

    /// Moves the job to its terminal state with the final processed count.
    async fn finalize(&self, client_id: &str, processed_files: usize) -> StoreResult<()>;
}

fn find_startable(jobs: &[Job], client_id: &str) -> Option<JobSummary> {
    jobs.iter()
        .find(|job| job.client_id == client_id && job.status.is_startable())
        .map(Job::summary)
}

fn find_with_status(jobs: &[Job], status: JobStatus) -> Option<JobSummary> {
    jobs.iter().find(|job| job.status == status).map(Job::summary)
}

/// Returns false when no record matches `client_id`.
fn apply_status_update(
    jobs: &mut [Job],
    client_id: &str,
    total_files: usize,
    processed_files: usize,
) -> bool {
    match jobs.iter_mut().find(|job| job.client_id == client_id) {
        Some(job) => {
            job.status = JobStatus::Processing;
            job.total_files = total_files;
            job.processed_files = processed_files;
            true
        }
        None => false,
    }
}

/// Returns false when no record matches `client_id`.
fn apply_finalize(jobs: &mut [Job], client_id: &str, processed_files: usize) -> bool {
    match jobs.iter_mut().find(|job| job.client_id == client_id) {
        Some(job) => {
            job.status = JobStatus::CdnQueued;
            job.processed_files = processed_files;
            true
        }
        None => false,
    }
}
