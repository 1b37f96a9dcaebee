//! Process configuration, read from flags or the environment.

use std::path::PathBuf;
use clap::Parser;
use crate::processing::BatchConfig;
use crate::worker::DEFAULT_WORKERS;
use crate::core::DEFAULT_CHECKPOINT_INTERVAL;

/// Generate final and thumbnail derivatives for a client's queued uploads.
#[derive(Parser, Debug, Clone)]
#[command(name = "image-derivatives", version, about)]
pub struct AppConfig {
    /// Client whose queued job should be processed
    #[arg(long, env = "CLIENT_ID")]
    pub client_id: String,

    /// Root holding one input directory per client
    #[arg(long, env = "INPUT_DIR", default_value = "input")]
    pub input_dir: PathBuf,

    /// Root receiving one output directory per client
    #[arg(long, env = "OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// JSON document holding job records
    #[arg(long, env = "STATUS_FILE", default_value = "jobs.json")]
    pub status_file: PathBuf,

    /// Parallel workers per folder
    #[arg(long, env = "WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Successful files between status checkpoints
    #[arg(long, env = "CHECKPOINT_INTERVAL", default_value_t = DEFAULT_CHECKPOINT_INTERVAL)]
    pub checkpoint_interval: usize,

    /// Refuse to start while any job is already processing
    #[arg(long, env = "EXCLUSIVE")]
    pub exclusive: bool,

    /// Log level used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl AppConfig {
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            workers: self.workers,
            checkpoint_interval: self.checkpoint_interval,
            ..BatchConfig::default()
        }
    }

    /// `<input_dir>/<client_id>`
    pub fn client_input_root(&self) -> PathBuf {
        self.input_dir.join(&self.client_id)
    }

    /// `<output_dir>/<client_id>`
    pub fn client_output_root(&self) -> PathBuf {
        self.output_dir.join(&self.client_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tunables() {
        let config = AppConfig::try_parse_from(["image-derivatives", "--client-id", "HWW80"]).unwrap();

        assert_eq!(config.client_input_root(), PathBuf::from("input/HWW80"));
        assert_eq!(config.client_output_root(), PathBuf::from("output/HWW80"));
        assert_eq!(config.batch_config(), BatchConfig::default());
        assert!(!config.exclusive);
    }

    #[test]
    fn flags_override_tunables() {
        let config = AppConfig::try_parse_from([
            "image-derivatives",
            "--client-id",
            "C1",
            "--workers",
            "8",
            "--checkpoint-interval",
            "50",
            "--exclusive",
        ])
        .unwrap();

        let batch = config.batch_config();
        assert_eq!((batch.workers, batch.checkpoint_interval), (8, 50));
        assert!(config.exclusive);
    }
}
