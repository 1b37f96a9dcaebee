//! Core types for job records and derivative sizes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle state of a client's job record.
///
/// Tags written by other producers are kept verbatim in [`JobStatus::Other`]
/// so a rewrite of the store never changes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    /// Enqueued upstream, ready to start
    Queued,
    /// Batch is running; counts are being checkpointed
    Processing,
    /// Terminal state written on finalize, picked up by the CDN uploader
    CdnQueued,
    Done,
    Other(String),
}

impl JobStatus {
    pub fn is_startable(&self) -> bool {
        matches!(self, Self::Queued)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::CdnQueued => "cdn-queued",
            Self::Done => "done",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for JobStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "queued" => Self::Queued,
            "processing" => Self::Processing,
            "cdn-queued" => Self::CdnQueued,
            "done" => Self::Done,
            _ => Self::Other(tag),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// A client's job record as held by the status store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub status: JobStatus,
    /// Eligible images discovered at batch start
    #[serde(rename = "totalfile", default)]
    pub total_files: usize,
    /// Successfully processed images
    #[serde(rename = "processedfile", default)]
    pub processed_files: usize,
    /// Fields owned by other producers, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    pub fn queued(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            status: JobStatus::Queued,
            total_files: 0,
            processed_files: 0,
            extra: Map::new(),
        }
    }

    pub fn summary(&self) -> JobSummary {
        JobSummary {
            client_id: self.client_id.clone(),
        }
    }
}

/// Minimal projection returned by job lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    #[serde(rename = "clientId")]
    pub client_id: String,
}

/// The two derivative sizes produced for every source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivativeKind {
    Final,
    Thumbnail,
}

impl DerivativeKind {
    /// Output subdirectory name under the client's output root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Final => "final",
            Self::Thumbnail => "thumbnail",
        }
    }
}
