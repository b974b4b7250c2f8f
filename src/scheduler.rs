//! One-shot timers
//!
//! A single-threaded task queue driven by an explicit clock. The owner
//! advances the clock when its event loop wakes up; every task whose
//! deadline has passed is returned exactly once, in deadline order.

use std::time::Duration;

/// Handle used to cancel a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TimerHandle,
    deadline: Duration,
    task: T,
}

/// Queue of one-shot tasks on a monotonic clock
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current clock value
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks waiting to fire
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether a task is still waiting
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|s| s.handle == handle)
    }

    /// Earliest deadline among waiting tasks
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.deadline).min()
    }

    /// Run `task` once `delay` has elapsed from now
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            handle,
            deadline: self.now + delay,
            task,
        });
        handle
    }

    /// Cancel a waiting task; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    /// Cancel everything; returns how many tasks were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Move the clock to `now` and return due tasks.
    ///
    /// The clock never moves backwards; an earlier `now` fires nothing.
    /// Ties on the deadline fire in scheduling order.
    pub fn advance_to(&mut self, now: Duration) -> Vec<T> {
        if now > self.now {
            self.now = now;
        }

        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|s| s.deadline <= now);
        self.pending = waiting;

        due.sort_by_key(|s| (s.deadline, s.handle));
        due.into_iter().map(|s| s.task).collect()
    }

    /// Advance the clock by `delta`
    pub fn advance_by(&mut self, delta: Duration) -> Vec<T> {
        let target = self.now + delta;
        self.advance_to(target)
    }
}
