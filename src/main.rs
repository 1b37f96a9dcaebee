// This is the primary entry point for the derivative generator.
// The lib.rs file serves only as a public API for external consumers.

use std::time::Instant;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use image_derivatives_lib::{
    AppConfig,
    BatchCoordinator,
    BatchRequest,
    JsonFileStatusStore,
    run_client_batch,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stdout)
        .compact()                // Use compact formatter instead of pretty
        .init();

    let started = Instant::now();
    info!("=== Starting derivative batch for clientId {} ===", config.client_id);

    let store = JsonFileStatusStore::new(&config.status_file);
    let coordinator = BatchCoordinator::new(config.batch_config());
    let request = BatchRequest::from_config(&config);

    run_client_batch(&store, &coordinator, &request)
        .await
        .with_context(|| format!("batch for clientId {} failed", config.client_id))?;

    info!("Time Taken: {:.2} seconds", started.elapsed().as_secs_f64());
    Ok(())
}
