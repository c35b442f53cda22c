//! Deferred tasks for a single-threaded event loop.
//!
//! The [`TimerQueue`] never sleeps or spawns. The owner schedules payloads at
//! a deadline, and periodically asks for everything that has come due.
//! Cancelling a handle removes its payload before it can fire.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

/// Identifies a scheduled task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A queue of payloads ordered by deadline.
///
/// Tasks sharing a deadline fire in the order they were scheduled.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next: u64,
    pending: BTreeMap<(DateTime<Utc>, TimerHandle), T>,
    deadlines: HashMap<TimerHandle, DateTime<Utc>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// Schedules `payload` to fire at `at`.
    pub fn schedule(&mut self, at: DateTime<Utc>, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next);
        self.next += 1;
        self.pending.insert((at, handle), payload);
        self.deadlines.insert(handle, at);
        handle
    }

    /// Cancels a pending task, returning its payload.
    ///
    /// Returns `None` if the task already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let at = self.deadlines.remove(&handle)?;
        self.pending.remove(&(at, handle))
    }

    /// Whether `handle` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.keys().next().map(|(at, _)| *at)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every task due at or before `now`, earliest
    /// first.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            let (at, handle) = *entry.key();
            if at > now {
                break;
            }
            due.push(entry.remove());
            self.deadlines.remove(&handle);
        }
        due
    }
}
