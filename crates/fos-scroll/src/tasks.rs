//! Delayed Tasks
//!
//! Single-threaded delayed task queue. The host drains due tasks on the
//! same thread that delivers scroll changes, so tasks never interleave
//! with change handling.

use std::time::{Duration, Instant};

/// Handle for a posted task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TaskId,
    due: Instant,
    task: T,
}

/// Delayed task queue
#[derive(Debug)]
pub struct TaskQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), next_id: 1 }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a task to run `delay` after `now`
    pub fn post_delayed(&mut self, now: Instant, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due: now + delay, task });
        id
    }

    /// Cancel a pending task; returns false if it already ran
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove and return due tasks in due order
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.due <= now);
        self.entries = pending;
        due.sort_by_key(|e| (e.due, e.id.0));
        due.into_iter().map(|e| e.task).collect()
    }

    /// Time until the next task is due
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.entries
            .iter()
            .map(|e| e.due.saturating_duration_since(now))
            .min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
