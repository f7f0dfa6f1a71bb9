//! BinaryHeap-based timer queue
//!
//! # Complexity
//!
//! - Insert: O(log n)
//! - Pop due: O(log n) per fired timer
//! - Next deadline: O(1)
//!
//! There is no cancellation: a registered timer always fires once, unless
//! its loop stops first.

use std::collections::BinaryHeap;
use std::time::Instant;

use guictx_core::{Callback, TimerHandle};

use super::TimerEntry;

/// Wrapper for heap ordering (min-heap by deadline)
struct HeapEntry(TimerEntry);

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0.deadline == other.0.deadline && self.0.handle == other.0.handle
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed for a min-heap. Equal deadlines fall back to the handle,
        // which preserves registration order.
        match other.0.deadline.cmp(&self.0.deadline) {
            std::cmp::Ordering::Equal => other.0.handle.cmp(&self.0.handle),
            ord => ord,
        }
    }
}

/// Counters snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerQueueStats {
    pub pending: usize,
    pub total_inserted: u64,
    pub total_fired: u64,
}

/// Min-heap of one-shot timers
pub struct TimerQueue {
    heap: BinaryHeap<HeapEntry>,
    next_handle: u64,
    total_inserted: u64,
    total_fired: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_handle: 1,
            total_inserted: 0,
            total_fired: 0,
        }
    }

    /// Register a callback due at `deadline`
    pub fn insert(&mut self, deadline: Instant, callback: Callback) -> TimerHandle {
        let handle = TimerHandle::new(self.next_handle);
        self.next_handle += 1;
        self.total_inserted += 1;
        self.heap.push(HeapEntry(TimerEntry::new(handle, deadline, callback)));
        handle
    }

    /// Remove and return every timer due at `now`, in firing order
    pub fn take_expired(&mut self, now: Instant) -> Vec<TimerEntry> {
        let mut expired = Vec::new();
        while let Some(entry) = self.pop_due(now) {
            expired.push(entry);
        }
        expired
    }

    /// Remove and return the earliest timer if it is due at `now`
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerEntry> {
        if !self.heap.peek()?.0.is_due(now) {
            return None;
        }
        self.total_fired += 1;
        self.heap.pop().map(|e| e.0)
    }

    /// When the earliest timer is due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|e| e.0.deadline)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn stats(&self) -> TimerQueueStats {
        TimerQueueStats {
            pending: self.heap.len(),
            total_inserted: self.total_inserted,
            total_fired: self.total_fired,
        }
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Callback) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let l = Arc::clone(&log);
        let make = move |name: &'static str| -> Callback {
            let l = Arc::clone(&l);
            Box::new(move || l.lock().unwrap().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let (log, make) = recorder();
        let mut queue = TimerQueue::new();
        let base = Instant::now();

        queue.insert(base + Duration::from_millis(30), make("c"));
        queue.insert(base + Duration::from_millis(10), make("a"));
        queue.insert(base + Duration::from_millis(20), make("b"));

        for entry in queue.take_expired(base + Duration::from_millis(30)) {
            (entry.callback)();
        }
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_equal_deadlines_keep_registration_order() {
        let (log, make) = recorder();
        let mut queue = TimerQueue::new();
        let at = Instant::now() + Duration::from_millis(5);

        for name in ["first", "second", "third", "fourth"] {
            queue.insert(at, make(name));
        }
        for entry in queue.take_expired(at) {
            (entry.callback)();
        }
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_not_due_stays_queued() {
        let mut queue = TimerQueue::new();
        let base = Instant::now();
        queue.insert(base + Duration::from_millis(100), Box::new(|| {}));

        assert!(queue.take_expired(base).is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_deadline(), Some(base + Duration::from_millis(100)));
    }

    #[test]
    fn test_handles_and_stats() {
        let mut queue = TimerQueue::new();
        let now = Instant::now();
        let h1 = queue.insert(now, Box::new(|| {}));
        let h2 = queue.insert(now, Box::new(|| {}));
        assert!(h1 < h2);

        let fired = queue.take_expired(now);
        assert_eq!(fired.len(), 2);
        assert_eq!(
            queue.stats(),
            TimerQueueStats { pending: 0, total_inserted: 2, total_fired: 2 }
        );
        assert!(queue.is_empty());
        assert!(queue.next_deadline().is_none());
    }
}
