//! Top-level entry for one client's batch.

use std::path::PathBuf;
use tracing::info;
use crate::config::AppConfig;
use crate::processing::{BatchCoordinator, BatchSummary};
use crate::store::StatusStore;
use crate::utils::BatchResult;

/// Everything needed to start one client's batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub client_id: String,
    /// `<input_dir>/<client_id>`
    pub input_root: PathBuf,
    /// `<output_dir>/<client_id>`
    pub output_root: PathBuf,
    /// Skip when another job is already processing
    pub exclusive: bool,
}

impl BatchRequest {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            input_root: config.client_input_root(),
            output_root: config.client_output_root(),
            exclusive: config.exclusive,
        }
    }
}

/// Runs the batch only when the store holds a startable job for the client.
///
/// Returns `Ok(None)` when the batch was skipped: no queued job for the
/// client, or (with `exclusive`) another job already processing.
pub async fn run_client_batch(
    store: &dyn StatusStore,
    coordinator: &BatchCoordinator,
    request: &BatchRequest,
) -> BatchResult<Option<BatchSummary>> {
    let client_id = request.client_id.as_str();

    if request.exclusive {
        if let Some(busy) = store.find_processing_job().await? {
            info!(
                "Job for clientId {} is already processing, not starting {}.",
                busy.client_id, client_id
            );
            return Ok(None);
        }
    }

    if store.find_startable_job(client_id).await?.is_none() {
        info!("No queued data found for clientId {}.", client_id);
        return Ok(None);
    }

    let summary = coordinator
        .run_batch(&request.input_root, &request.output_root, client_id, store)
        .await?;

    info!(
        "Finished clientId {}: {}/{} files processed, {} failed, time taken: {:.2} seconds",
        client_id,
        summary.succeeded,
        summary.total_files,
        summary.failed,
        summary.elapsed.as_secs_f64()
    );

    Ok(Some(summary))
}
