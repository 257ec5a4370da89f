//! Bounded task queue with backpressure support
//!
//! The dynamic scanner feeds discovered directories through this
//! queue. When the queue is full, backpressure is applied: the
//! discovering worker processes the subtree inline rather than
//! blocking, which bounds memory under runaway fan-out.
//!
//! Termination is tracked by a pending-task counter, not queue
//! occupancy: a task's increment is published before it is enqueued,
//! and its decrement happens only after its direct processing
//! completes. A worker that is mid-enumeration therefore still holds
//! its own task's count, so the counter cannot hit zero while more
//! work is about to appear — even if the queue is momentarily empty.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A directory awaiting traversal
///
/// Ownership transfers through the queue; each task is retired
/// exactly once, either by a worker that dequeued it or inline by
/// the worker that discovered it.
#[derive(Debug, Clone)]
pub struct DirTask {
    /// Full path to the directory
    pub path: PathBuf,
}

impl DirTask {
    /// Create a new directory task
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Statistics for the task queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total tasks enqueued
    pub enqueued: AtomicU64,

    /// Total tasks dequeued
    pub dequeued: AtomicU64,

    /// Subtrees processed inline due to backpressure
    pub inline_processed: AtomicU64,

    /// Number of times the queue refused a push
    pub backpressure_events: AtomicU64,
}

impl QueueStats {
    /// Tasks that flowed through the queue
    pub fn throughput(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }

    /// Subtrees handled inline
    pub fn inline_count(&self) -> u64 {
        self.inline_processed.load(Ordering::Relaxed)
    }

    /// Backpressure event count
    pub fn backpressure_count(&self) -> u64 {
        self.backpressure_events.load(Ordering::Relaxed)
    }
}

/// Bounded task queue with a pending-work counter
pub struct TaskQueue {
    sender: Sender<DirTask>,
    receiver: Receiver<DirTask>,
    capacity: usize,

    /// Tasks created but not yet retired
    pending: Arc<AtomicUsize>,

    /// Fires once when the pending count returns to zero
    done_tx: Sender<()>,
    done_rx: Receiver<()>,

    stats: Arc<QueueStats>,
}

impl TaskQueue {
    /// Create a new task queue with the specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        let (done_tx, done_rx) = bounded(1);

        Self {
            sender,
            receiver,
            capacity,
            pending: Arc::new(AtomicUsize::new(0)),
            done_tx,
            done_rx,
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Get a sender handle (clone one per worker)
    pub fn sender(&self) -> TaskSender {
        TaskSender {
            sender: self.sender.clone(),
            pending: Arc::clone(&self.pending),
            done_tx: self.done_tx.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get a receiver handle (clone one per worker)
    pub fn receiver(&self) -> TaskReceiver {
        TaskReceiver {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Get queue statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }

    /// Current number of queued tasks
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Queue capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tasks created but not yet retired
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Block until every created task has been retired
    ///
    /// Must be called after at least one task has been seeded,
    /// otherwise there is no completion to wait for.
    pub fn wait_idle(&self) {
        // Sender side never disconnects while the queue is alive
        let _ = self.done_rx.recv();
    }
}

/// Handle for creating tasks
#[derive(Clone)]
pub struct TaskSender {
    sender: Sender<DirTask>,
    pending: Arc<AtomicUsize>,
    done_tx: Sender<()>,
    stats: Arc<QueueStats>,
}

impl TaskSender {
    /// Try to hand a directory off to the queue
    ///
    /// Returns `Ok(true)` if the task was enqueued (the pending count
    /// now covers it), `Ok(false)` if the queue is full and the
    /// caller must process the subtree inline, `Err` if the queue is
    /// disconnected.
    ///
    /// The pending count is raised before the push so a consumer can
    /// never retire the task and observe zero while the handoff is
    /// still in flight.
    pub fn try_send(&self, task: DirTask) -> Result<bool, ()> {
        self.pending.fetch_add(1, Ordering::SeqCst);

        match self.sender.try_send(task) {
            Ok(()) => {
                self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
                Ok(true)
            }
            Err(TrySendError::Full(_)) => {
                self.pending.fetch_sub(1, Ordering::SeqCst);
                self.stats.backpressure_events.fetch_add(1, Ordering::Relaxed);
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => {
                self.pending.fetch_sub(1, Ordering::SeqCst);
                Err(())
            }
        }
    }

    /// Retire a task after its direct processing is complete
    ///
    /// Descendants enqueued while processing carry their own counts.
    /// The worker that retires the last outstanding task fires the
    /// completion signal.
    pub fn finish(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.done_tx.try_send(());
        }
    }

    /// Record a subtree processed inline (for stats)
    pub fn record_inline(&self) {
        self.stats.inline_processed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Handle for consuming tasks
#[derive(Clone)]
pub struct TaskReceiver {
    receiver: Receiver<DirTask>,
    stats: Arc<QueueStats>,
}

impl TaskReceiver {
    /// Receive a task, giving up after `timeout`
    ///
    /// Workers poll with a timeout so they can observe the shutdown
    /// flag between tasks.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<DirTask> {
        match self.receiver.recv_timeout(timeout) {
            Ok(task) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(task)
            }
            Err(_) => None,
        }
    }

    /// Try to receive a task without blocking
    pub fn try_recv(&self) -> Option<DirTask> {
        match self.receiver.try_recv() {
            Ok(task) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(task)
            }
            Err(_) => None,
        }
    }
}
