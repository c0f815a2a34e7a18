//! Batch-oriented render scheduler.
//!
//! A fixed pool of worker threads runs one batch of jobs at a time behind a
//! mutex/condition-variable pair. Submission blocks the caller until every
//! job in the batch has finished; the pool is a barrier, not a general work
//! queue, and overlapping submissions are an error.

use crate::RenderError;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

/// A half-open row range `[start_row, end_row)` handled by one worker
/// invocation. Tasks in a batch are disjoint and jointly cover the frame,
/// so no two tasks ever touch the same pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTask {
    pub start_row: u32,
    pub end_row: u32,
}

impl RenderTask {
    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row
    }
}

/// Split `height` rows into up to `task_count` contiguous, disjoint,
/// jointly exhaustive tasks of near-equal size.
pub fn partition_rows(height: u32, task_count: usize) -> Vec<RenderTask> {
    if height == 0 {
        return Vec::new();
    }
    let count = task_count.clamp(1, height as usize) as u32;
    let base = height / count;
    let remainder = height % count;

    let mut tasks = Vec::with_capacity(count as usize);
    let mut start = 0;
    for index in 0..count {
        let rows = base + u32::from(index < remainder);
        tasks.push(RenderTask {
            start_row: start,
            end_row: start + rows,
        });
        start += rows;
    }
    tasks
}

type Job = Box<dyn FnOnce() + Send + 'static>;

struct PoolState {
    queue: Vec<Job>,
    outstanding: usize,
    batch_active: bool,
    stop: bool,
}

struct Shared {
    state: Mutex<PoolState>,
    work_available: Condvar,
    batch_done: Condvar,
}

/// Fixed pool of render workers with barrier-style batch submission.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    /// Spawn a pool with `worker_count` threads (at least one).
    pub fn new(worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                queue: Vec::new(),
                outstanding: 0,
                batch_active: false,
                stop: false,
            }),
            work_available: Condvar::new(),
            batch_done: Condvar::new(),
        });

        let workers = (0..worker_count)
            .map(|index| {
                let shared = Arc::clone(&shared);
                std::thread::Builder::new()
                    .name(format!("render-worker-{index}"))
                    .spawn(move || worker_loop(&shared))
                    .expect("failed to spawn render worker")
            })
            .collect();

        log::debug!("render pool: {worker_count} workers");
        Self { shared, workers }
    }

    /// Pool sized to the machine: hardware parallelism minus one thread
    /// reserved for coordination and presentation.
    pub fn with_default_size() -> Self {
        Self::new(num_cpus::get().saturating_sub(1).max(1))
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Run a batch of jobs and block until all of them have completed.
    ///
    /// Submitting while a previous batch is still outstanding is
    /// [`RenderError::SchedulerMisuse`]; the pool is strictly one batch at
    /// a time.
    pub fn submit_and_wait<'env>(
        &self,
        jobs: Vec<Box<dyn FnOnce() + Send + 'env>>,
    ) -> Result<(), RenderError> {
        if jobs.is_empty() {
            return Ok(());
        }

        // SAFETY: this call does not return until every job in the batch has
        // run to completion (or the wait below observes outstanding == 0),
        // so no job can outlive the borrows captured in it.
        let jobs: Vec<Job> = unsafe { std::mem::transmute(jobs) };

        {
            let mut state = self.shared.state.lock().expect("scheduler mutex poisoned");
            if state.batch_active {
                return Err(RenderError::SchedulerMisuse(
                    "submitted a batch while a previous batch is outstanding",
                ));
            }
            state.outstanding = jobs.len();
            state.queue = jobs;
            state.batch_active = true;
        }
        self.shared.work_available.notify_all();

        let mut state = self.shared.state.lock().expect("scheduler mutex poisoned");
        while state.outstanding > 0 {
            state = self
                .shared
                .batch_done
                .wait(state)
                .expect("scheduler mutex poisoned");
        }
        Ok(())
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock().expect("scheduler mutex poisoned");
            state.stop = true;
        }
        self.shared.work_available.notify_all();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

fn worker_loop(shared: &Shared) {
    loop {
        let job = {
            let mut state = shared.state.lock().expect("scheduler mutex poisoned");
            loop {
                if let Some(job) = state.queue.pop() {
                    break job;
                }
                // Drain in-flight work before honoring shutdown
                if state.stop {
                    return;
                }
                state = shared
                    .work_available
                    .wait(state)
                    .expect("scheduler mutex poisoned");
            }
        };

        // A panicking job must not wedge the barrier
        if catch_unwind(AssertUnwindSafe(job)).is_err() {
            log::error!("render job panicked; its pixels are left unwritten");
        }

        let mut state = shared.state.lock().expect("scheduler mutex poisoned");
        state.outstanding -= 1;
        if state.outstanding == 0 {
            state.batch_active = false;
            shared.batch_done.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_partition_is_disjoint_and_exhaustive() {
        let tasks = partition_rows(20, 2);
        assert_eq!(
            tasks,
            vec![
                RenderTask {
                    start_row: 0,
                    end_row: 10
                },
                RenderTask {
                    start_row: 10,
                    end_row: 20
                },
            ]
        );

        // Uneven split still covers every row exactly once
        let tasks = partition_rows(23, 4);
        assert_eq!(tasks.first().unwrap().start_row, 0);
        assert_eq!(tasks.last().unwrap().end_row, 23);
        for pair in tasks.windows(2) {
            assert_eq!(pair[0].end_row, pair[1].start_row);
        }
        let total: u32 = tasks.iter().map(RenderTask::row_count).sum();
        assert_eq!(total, 23);
    }

    #[test]
    fn test_partition_never_exceeds_height() {
        let tasks = partition_rows(3, 16);
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|task| task.row_count() == 1));
        assert!(partition_rows(0, 4).is_empty());
    }

    #[test]
    fn test_batch_runs_every_job() {
        let pool = ThreadPool::new(4);
        let counter = AtomicUsize::new(0);

        let jobs: Vec<Box<dyn FnOnce() + Send + '_>> = (0..64)
            .map(|_| {
                Box::new(|| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }) as Box<dyn FnOnce() + Send + '_>
            })
            .collect();

        pool.submit_and_wait(jobs).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 64);
    }

    #[test]
    fn test_disjoint_tasks_write_disjoint_rows() {
        // Two tasks covering rows [0, 10) and [10, 20) of a 20-row, 4-wide
        // buffer must together write every slot exactly once.
        let pool = ThreadPool::new(2);
        let width = 4usize;
        let mut buffer = vec![0u32; 20 * width];
        let tasks = partition_rows(20, 2);

        {
            let mut jobs: Vec<Box<dyn FnOnce() + Send + '_>> = Vec::new();
            let mut rest = buffer.as_mut_slice();
            for task in &tasks {
                let (rows, tail) = rest.split_at_mut(task.row_count() as usize * width);
                rest = tail;
                let marker = task.start_row + 1;
                jobs.push(Box::new(move || {
                    for slot in rows.iter_mut() {
                        *slot += marker;
                    }
                }));
            }
            pool.submit_and_wait(jobs).unwrap();
        }

        for (index, &value) in buffer.iter().enumerate() {
            let row = index / width;
            let expected = if row < 10 { 1 } else { 11 };
            assert_eq!(value, expected, "row {row} written incorrectly");
        }
    }

    #[test]
    fn test_overlapping_submission_is_misuse() {
        let pool = Arc::new(ThreadPool::new(2));
        let observed = Arc::new(Mutex::new(None));

        let pool_inner = Arc::clone(&pool);
        let observed_inner = Arc::clone(&observed);
        let jobs: Vec<Box<dyn FnOnce() + Send + 'static>> = vec![Box::new(move || {
            // A batch is by definition outstanding while this job runs
            let nested: Vec<Box<dyn FnOnce() + Send + 'static>> = vec![Box::new(|| {})];
            let result = pool_inner.submit_and_wait(nested);
            *observed_inner.lock().unwrap() = Some(result);
        })];

        pool.submit_and_wait(jobs).unwrap();

        let result = observed.lock().unwrap().take().expect("job ran");
        assert_eq!(
            result,
            Err(RenderError::SchedulerMisuse(
                "submitted a batch while a previous batch is outstanding"
            ))
        );
    }

    #[test]
    fn test_sequential_batches_are_fine() {
        let pool = ThreadPool::new(2);
        for _ in 0..3 {
            let jobs: Vec<Box<dyn FnOnce() + Send + 'static>> =
                (0..8).map(|_| Box::new(|| {}) as Box<dyn FnOnce() + Send>).collect();
            pool.submit_and_wait(jobs).unwrap();
        }
    }
}
