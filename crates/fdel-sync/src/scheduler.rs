//! Virtual-time task queue.
//!
//! Tasks are `(delay, action)` pairs ordered by due time, then by insertion
//! order. The queue never reads a wall clock: the caller advances time,
//! either a real event loop sleeping until [`TaskQueue::next_due`] or a test
//! stepping it by hand.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

pub struct TaskQueue<T> {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }
}

impl<T> TaskQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queues `task` to run `delay` after the current time and returns its due time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> Duration {
        let due = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(Entry { due, seq, task }));
        due
    }

    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.peek().map(|Reverse(entry)| entry.due)
    }

    /// Moves the clock to `time` (never backwards) and returns every task
    /// due by then, earliest first.
    pub fn advance_to(&mut self, time: Duration) -> Vec<T> {
        self.now = self.now.max(time);
        let mut due = Vec::new();
        while self
            .pending
            .peek()
            .is_some_and(|Reverse(entry)| entry.due <= self.now)
        {
            if let Some(Reverse(entry)) = self.pending.pop() {
                due.push(entry.task);
            }
        }
        due
    }

    pub fn advance_by(&mut self, delta: Duration) -> Vec<T> {
        self.advance_to(self.now.saturating_add(delta))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
