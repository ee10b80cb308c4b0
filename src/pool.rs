use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

use crate::error::{Error, Result};

/// Why a job produced no value.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("worker pool closed before the job could start")]
    Closed,

    #[error("job aborted: {0}")]
    Aborted(#[from] JoinError),
}

/// Fixed-size pool of concurrent workers.
///
/// Every job is spawned onto the tokio runtime right away, but a job only
/// starts once it holds one of the pool's `size` permits, so at most `size`
/// jobs execute at any instant.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig(
                "worker pool needs at least one worker".to_string(),
            ));
        }
        if size > Semaphore::MAX_PERMITS {
            return Err(Error::InvalidConfig(format!(
                "worker pool cannot have more than {} workers",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Jobs currently holding a permit.
    pub fn busy(&self) -> usize {
        self.size - self.permits.available_permits()
    }

    /// Run `work` on every job and wait until all of them are done.
    ///
    /// The returned vector has one entry per job, in submission order. A job
    /// that panicked shows up as [`JobError::Aborted`]; a job that never got
    /// a permit shows up as [`JobError::Closed`] and was not run.
    pub async fn run<I, F, Fut, T>(
        &self,
        jobs: I,
        work: F,
    ) -> Vec<std::result::Result<T, JobError>>
    where
        I: IntoIterator,
        F: Fn(I::Item) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| {
                let permits = Arc::clone(&self.permits);
                let fut = work(job);
                tokio::spawn(async move {
                    let _permit = match permits.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => return Err(JobError::Closed),
                    };
                    Ok(fut.await)
                })
            })
            .collect();

        tracing::debug!("submitted {} jobs to {} workers", handles.len(), self.size);
        join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.map_err(JobError::from).and_then(|res| res))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(WorkerPool::new(0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn oversized_pool_is_rejected() {
        assert!(matches!(
            WorkerPool::new(Semaphore::MAX_PERMITS + 1),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            WorkerPool::new(usize::MAX),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn runs_exactly_pool_size_jobs_at_once() {
        let pool = WorkerPool::new(3).unwrap();
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = pool
            .run(0..20, |i| {
                let running = Arc::clone(&running);
                let peak = Arc::clone(&peak);
                async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    i * 2
                }
            })
            .await;

        assert_eq!(results.len(), 20);
        let values: Vec<_> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(values, (0..20).map(|i| i * 2).collect::<Vec<_>>());
        assert_eq!(peak.load(Ordering::SeqCst), 3);
        assert_eq!(pool.busy(), 0);
    }

    #[tokio::test]
    async fn panicking_job_still_yields_an_entry() {
        let pool = WorkerPool::new(2).unwrap();
        let results = pool
            .run(0..4, |i| async move {
                if i == 2 {
                    panic!("job {} blew up", i);
                }
                i
            })
            .await;

        assert_eq!(results.len(), 4);
        assert!(matches!(&results[2], Err(JobError::Aborted(e)) if e.is_panic()));
        assert_eq!(*results[3].as_ref().unwrap(), 3);
    }

    #[tokio::test]
    async fn closed_pool_runs_nothing() {
        let pool = WorkerPool::new(2).unwrap();
        pool.permits.close();
        let ran = Arc::new(AtomicUsize::new(0));

        let results = pool
            .run(0..3, |_| {
                let ran = Arc::clone(&ran);
                async move {
                    ran.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| matches!(r, Err(JobError::Closed))));
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_batch_returns_immediately() {
        let pool = WorkerPool::new(1).unwrap();
        let results = pool.run(Vec::<u32>::new(), |i| async move { i }).await;
        assert!(results.is_empty());
    }
}
