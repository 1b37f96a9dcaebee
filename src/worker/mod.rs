mod pool;
mod error;

pub use pool::{DEFAULT_WORKERS, WorkerPool};
pub use error::{WorkerError, WorkerResult};
