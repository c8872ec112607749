// Cancellable delayed tasks for session timeouts
//
// `TokioScheduler` runs tasks on a tokio runtime; `ManualScheduler` keeps a
// virtual clock that only moves when `advance` is called.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Work to run once a delay elapses
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Schedules a task to run once after a delay
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TimerHandle;
}

/// Handle to a scheduled task
///
/// Cancelling guarantees the task will not run, even if its delay has
/// already elapsed but it has not started yet. Dropping the handle does
/// not cancel.
#[derive(Debug)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
    abort: Option<tokio::task::AbortHandle>,
}

impl TimerHandle {
    fn new(cancelled: Arc<AtomicBool>, abort: Option<tokio::task::AbortHandle>) -> Self {
        Self { cancelled, abort }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Scheduler backed by a tokio runtime
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime of the calling context, if there is one
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !flag.load(Ordering::SeqCst) {
                task();
            }
        });

        TimerHandle::new(cancelled, Some(join.abort_handle()))
    }
}

struct PendingTask {
    id: u64,
    due: Duration,
    cancelled: Arc<AtomicBool>,
    task: ScheduledTask,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTask>,
}

/// Scheduler driven by an explicit virtual clock
///
/// Tasks run on the thread that calls `advance`, in due-time order.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<ManualQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn elapsed(&self) -> Duration {
        self.queue.lock().now
    }

    /// Number of scheduled tasks that are neither cancelled nor run
    pub fn pending_count(&self) -> usize {
        self.queue
            .lock()
            .pending
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// Move the clock forward, running every task that becomes due
    ///
    /// Returns the number of tasks that ran. The queue lock is released
    /// while a task runs, so tasks may schedule or cancel other timers.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.queue.lock().now.saturating_add(by);
        let mut fired = 0;

        loop {
            let next = {
                let mut queue = self.queue.lock();
                queue
                    .pending
                    .retain(|t| !t.cancelled.load(Ordering::SeqCst));
                let due = queue
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(idx, _)| idx);
                due.map(|idx| {
                    let task = queue.pending.remove(idx);
                    queue.now = task.due;
                    task
                })
            };

            match next {
                Some(pending) => {
                    if !pending.cancelled.load(Ordering::SeqCst) {
                        (pending.task)();
                        fired += 1;
                    }
                }
                None => break,
            }
        }

        self.queue.lock().now = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut queue = self.queue.lock();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now.saturating_add(delay);
        queue.pending.push(PendingTask {
            id,
            due,
            cancelled: cancelled.clone(),
            task,
        });
        TimerHandle::new(cancelled, None)
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;
