//! Context counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a Context's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextStats {
    /// Tasks pushed onto the queue
    pub tasks_enqueued: u64,
    /// Tasks that ran to completion
    pub tasks_run: u64,
    /// Tasks that panicked
    pub tasks_panicked: u64,
    /// Drain handler invocations
    pub drain_ticks: u64,
    /// Liveness handler invocations
    pub liveness_checks: u64,
    /// Pre-start deferred calls handed to the loop at start
    pub deferred_replayed: u64,
    /// Worker threads spawned
    pub workers_spawned: u64,
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    pub tasks_enqueued: AtomicU64,
    pub tasks_run: AtomicU64,
    pub tasks_panicked: AtomicU64,
    pub drain_ticks: AtomicU64,
    pub liveness_checks: AtomicU64,
    pub deferred_replayed: AtomicU64,
    pub workers_spawned: AtomicU64,
}

impl StatsCounters {
    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ContextStats {
        ContextStats {
            tasks_enqueued: self.tasks_enqueued.load(Ordering::Relaxed),
            tasks_run: self.tasks_run.load(Ordering::Relaxed),
            tasks_panicked: self.tasks_panicked.load(Ordering::Relaxed),
            drain_ticks: self.drain_ticks.load(Ordering::Relaxed),
            liveness_checks: self.liveness_checks.load(Ordering::Relaxed),
            deferred_replayed: self.deferred_replayed.load(Ordering::Relaxed),
            workers_spawned: self.workers_spawned.load(Ordering::Relaxed),
        }
    }
}
