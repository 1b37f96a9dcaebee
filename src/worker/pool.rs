use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;
use crate::worker::error::{WorkerError, WorkerResult};

pub const DEFAULT_WORKERS: usize = 3;

/// Bounded pool of blocking workers scoped to one unit of batch work.
///
/// At most `worker_count` submitted jobs run at once. Callers drain the pool
/// with [`WorkerPool::next_completed`] until it returns `None`; only then has
/// every submitted job finished.
pub struct WorkerPool<T> {
    semaphore: Arc<Semaphore>,
    active_workers: Arc<AtomicUsize>,
    tasks: JoinSet<WorkerResult<T>>,
    worker_count: usize,
}

impl<T: Send + 'static> WorkerPool<T> {
    pub fn new(worker_count: Option<usize>) -> Self {
        let worker_count = worker_count.unwrap_or(DEFAULT_WORKERS).max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(worker_count)),
            active_workers: Arc::new(AtomicUsize::new(0)),
            tasks: JoinSet::new(),
            worker_count,
        }
    }

    /// Queues `job` to run on the blocking pool once a worker is free.
    pub fn submit<F>(&mut self, job: F)
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let semaphore = Arc::clone(&self.semaphore);
        let active_workers = Arc::clone(&self.active_workers);
        let worker_count = self.worker_count;

        self.tasks.spawn(run_job(semaphore, active_workers, worker_count, job));
    }

    /// Waits for the next job to finish, in completion order.
    ///
    /// Returns `None` once every submitted job has completed.
    pub async fn next_completed(&mut self) -> Option<WorkerResult<T>> {
        let joined = self.tasks.join_next().await?;
        Some(joined.map_err(WorkerError::from).and_then(|result| result))
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::Acquire)
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}

/// Holds a permit for the whole blocking run of `job`.
async fn run_job<T, F>(
    semaphore: Arc<Semaphore>,
    active_workers: Arc<AtomicUsize>,
    worker_count: usize,
    job: F,
) -> WorkerResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let _permit = semaphore.acquire_owned().await?;

    let current_workers = active_workers.fetch_add(1, Ordering::AcqRel) + 1;
    debug!("Worker started - Active: {}/{}", current_workers, worker_count);

    let result = tokio::task::spawn_blocking(job).await;

    let remaining = active_workers.fetch_sub(1, Ordering::AcqRel) - 1;
    debug!("Worker finished - Active: {}/{}", remaining, worker_count);

    result.map_err(WorkerError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn never_exceeds_worker_count() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let mut pool = WorkerPool::new(Some(3));

        for _ in 0..12 {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            pool.submit(move || {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(20));
                running.fetch_sub(1, Ordering::SeqCst);
            });
        }

        let mut completed = 0;
        while let Some(result) = pool.next_completed().await {
            result.unwrap();
            completed += 1;
        }

        assert_eq!(completed, 12);
        assert_eq!(pool.pending(), 0);
        assert_eq!(pool.active_workers(), 0);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn panics_become_worker_errors() {
        let mut pool = WorkerPool::new(Some(2));
        pool.submit(|| -> usize { panic!("boom") });
        pool.submit(|| 7);

        let mut values = Vec::new();
        let mut errors = 0;
        while let Some(result) = pool.next_completed().await {
            match result {
                Ok(v) => values.push(v),
                Err(WorkerError::ProcessingError(_)) => errors += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(values, vec![7]);
        assert_eq!(errors, 1);
    }

    #[test]
    fn zero_workers_rounds_up_to_one() {
        let pool: WorkerPool<()> = WorkerPool::new(Some(0));
        assert_eq!(pool.worker_count(), 1);
        let pool: WorkerPool<()> = WorkerPool::new(None);
        assert_eq!(pool.worker_count(), DEFAULT_WORKERS);
    }
}
