#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Task processing failed: {0}")]
    ProcessingError(String),

    #[error("Worker pool is closed: {0}")]
    CapacityError(String),

    #[error("Task was cancelled before completing")]
    Cancelled,
}

pub type WorkerResult<T> = Result<T, WorkerError>;

impl From<tokio::sync::AcquireError> for WorkerError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        WorkerError::CapacityError(format!("Failed to acquire worker: {}", err))
    }
}

impl From<tokio::task::JoinError> for WorkerError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            WorkerError::ProcessingError(format!("Worker panicked: {}", err))
        } else {
            WorkerError::Cancelled
        }
    }
}
