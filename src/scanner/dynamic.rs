//! Dynamic-queue scanner
//!
//! Parallelizes by feeding every discovered directory through a
//! bounded task queue, so parallelism scales with the directory
//! count at any depth rather than the root's fan-out. When the queue
//! saturates, the discovering worker walks the overflow subtree
//! inline instead of blocking.
//!
//! Termination is two-phase: the scan first waits for the pending
//! counter to return to zero (every created task retired), then
//! raises the shutdown flag and joins the workers. Queue emptiness
//! alone is not a termination condition; see [`queue`](super::queue).

use crate::error::{ScanError, WorkerError};
use crate::scanner::queue::{DirTask, TaskQueue, TaskReceiver, TaskSender};
use crate::scanner::stats::{ScanCounts, ScanStats};
use crate::scanner::walk::{is_dir, walk_tree};
use crate::scanner::Scanner;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// Default bound on the number of deferred directory tasks
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Interval at which idle workers re-check the shutdown flag
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Parallel scanner that discovers work at runtime
#[derive(Debug, Clone)]
pub struct DynamicQueueScanner {
    workers: usize,
    queue_capacity: usize,
}

impl DynamicQueueScanner {
    /// Create a scanner with the default queue capacity
    pub fn new(workers: usize) -> Self {
        Self::with_queue_capacity(workers, DEFAULT_QUEUE_CAPACITY)
    }

    /// Create a scanner with an explicit queue capacity
    ///
    /// Capacity must be at least 1 so the root can be seeded.
    pub fn with_queue_capacity(workers: usize, queue_capacity: usize) -> Self {
        Self {
            workers,
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Configured worker count
    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Scanner for DynamicQueueScanner {
    fn scan(&self, root: &Path) -> Result<ScanCounts, ScanError> {
        // Single worker: no parallel machinery, this is the baseline
        if self.workers == 1 {
            return walk_tree(root).map_err(|source| ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            });
        }

        // An unreadable root is the one fatal error; probe it before
        // any worker starts. Mid-scan failures are skipped.
        fs::read_dir(root).map_err(|source| ScanError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })?;

        let queue = TaskQueue::new(self.queue_capacity);
        let stats = Arc::new(ScanStats::new());
        let shutdown = Arc::new(AtomicBool::new(false));

        let seed_tx = queue.sender();
        if !matches!(seed_tx.try_send(DirTask::new(root.to_path_buf())), Ok(true)) {
            return Err(WorkerError::QueueDisconnected.into());
        }

        let mut handles = Vec::with_capacity(self.workers);
        for id in 0..self.workers {
            let task_rx = queue.receiver();
            let task_tx = queue.sender();
            let stats = Arc::clone(&stats);
            let shutdown = Arc::clone(&shutdown);

            let handle = thread::Builder::new()
                .name(format!("scan-{}", id))
                .spawn(move || worker_loop(id, task_rx, task_tx, stats, shutdown))
                .map_err(|e| WorkerError::SpawnFailed {
                    id,
                    reason: e.to_string(),
                })?;

            handles.push(handle);
        }

        // Phase one: every created task retired
        queue.wait_idle();

        // Phase two: workers observe the flag and drain out
        shutdown.store(true, Ordering::SeqCst);

        for (id, handle) in handles.into_iter().enumerate() {
            handle
                .join()
                .map_err(|_| WorkerError::Panicked { id })?;
        }

        trace!(
            enqueued = queue.stats().enqueued.load(Ordering::Relaxed),
            inline = queue.stats().inline_count(),
            backpressure = queue.stats().backpressure_count(),
            "Queue retired"
        );

        Ok(stats.snapshot())
    }
}

/// Worker loop: dequeue, enumerate, hand subdirectories back
fn worker_loop(
    id: usize,
    task_rx: TaskReceiver,
    task_tx: TaskSender,
    stats: Arc<ScanStats>,
    shutdown: Arc<AtomicBool>,
) {
    debug!(worker = id, "Worker starting");

    while !shutdown.load(Ordering::Relaxed) {
        let task = match task_rx.recv_timeout(POLL_INTERVAL) {
            Some(task) => task,
            None => continue,
        };

        process_task(id, &task, &task_tx, &stats);

        // Retires this task only; descendants carry their own counts
        task_tx.finish();
    }

    debug!(worker = id, "Worker shutting down");
}

/// Enumerate one directory, counting files and deferring subdirectories
fn process_task(id: usize, task: &DirTask, task_tx: &TaskSender, stats: &ScanStats) {
    let entries = match fs::read_dir(&task.path) {
        Ok(entries) => entries,
        Err(e) => {
            // Skipped, never fatal: sibling tasks are still in flight
            debug!(
                worker = id,
                path = %task.path.display(),
                error = %e,
                "Failed to read directory, skipping subtree"
            );
            return;
        }
    };

    stats.record_dir();

    for entry in entries.flatten() {
        if is_dir(&entry) {
            let path = entry.path();
            match task_tx.try_send(DirTask::new(path.clone())) {
                Ok(true) => {}
                // Queue saturated or gone: fold the whole subtree in
                // right here so no work is ever dropped
                Ok(false) | Err(()) => {
                    task_tx.record_inline();
                    match walk_tree(&path) {
                        Ok(counts) => stats.add_counts(counts),
                        Err(e) => {
                            debug!(
                                worker = id,
                                path = %path.display(),
                                error = %e,
                                "Inline walk failed, skipping subtree"
                            );
                        }
                    }
                }
            }
        } else {
            stats.record_file();
        }
    }
}
