//! Blocking, real-time event loop
//!
//! Runs due timers, then sleeps on a condvar until the next deadline. The
//! sleep is cut short when a new timer is registered or `quit` is called, so
//! the loop thread is only ever idle inside `run`'s wait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use guictx_core::{Callback, EventLoop, SurfaceId, TimerHandle};

use super::SurfaceRegistry;
use crate::timer::{self, TimerQueue, TimerQueueStats};

/// Real-time single-threaded loop
///
/// A loop runs once: after `quit`, `run` returns immediately.
pub struct MainLoop {
    timers: Mutex<TimerQueue>,
    wakeup: Condvar,
    surfaces: Mutex<SurfaceRegistry>,
    running: AtomicBool,
    quit: AtomicBool,
}

impl MainLoop {
    pub fn new() -> Self {
        Self {
            timers: Mutex::new(TimerQueue::new()),
            wakeup: Condvar::new(),
            surfaces: Mutex::new(SurfaceRegistry::new()),
            running: AtomicBool::new(false),
            quit: AtomicBool::new(false),
        }
    }

    /// Whether `quit` has been requested
    pub fn is_quit(&self) -> bool {
        self.quit.load(Ordering::Acquire)
    }

    pub fn timer_stats(&self) -> TimerQueueStats {
        self.lock_timers().stats()
    }

    fn lock_timers(&self) -> MutexGuard<'_, TimerQueue> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_surfaces(&self) -> MutexGuard<'_, SurfaceRegistry> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MainLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop for MainLoop {
    fn call_later(&self, delay: Duration, callback: Callback) -> TimerHandle {
        let handle = self.lock_timers().insert(Instant::now() + delay, callback);
        self.wakeup.notify_one();
        handle
    }

    fn run(&self) {
        if self.running.swap(true, Ordering::AcqRel) {
            tracing::warn!("main loop is already running");
            return;
        }
        tracing::debug!("main loop entered");

        let mut timers = self.lock_timers();
        while !self.is_quit() {
            let now = Instant::now();
            let due = timers.take_expired(now);

            if due.is_empty() {
                let next = timers.next_deadline();
                timers = match next {
                    Some(deadline) => {
                        self.wakeup
                            .wait_timeout(timers, deadline.saturating_duration_since(now))
                            .unwrap_or_else(PoisonError::into_inner)
                            .0
                    }
                    None => self.wakeup.wait(timers).unwrap_or_else(PoisonError::into_inner),
                };
                continue;
            }

            drop(timers);
            for entry in due {
                if self.is_quit() {
                    break;
                }
                timer::fire(entry, self.name());
            }
            timers = self.lock_timers();
        }
        drop(timers);

        self.running.store(false, Ordering::Release);
        tracing::debug!("main loop exited");
    }

    fn quit(&self) {
        self.quit.store(true, Ordering::Release);
        // Take the lock so a waiter between its flag check and its wait
        // cannot miss the notification.
        let _timers = self.lock_timers();
        self.wakeup.notify_all();
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn attach_surface(&self, parent: Option<SurfaceId>, title: &str) -> SurfaceId {
        self.lock_surfaces().attach(parent, title)
    }

    fn detach_surface(&self, id: SurfaceId) -> usize {
        self.lock_surfaces().detach(id)
    }

    fn is_attached(&self, id: SurfaceId) -> bool {
        self.lock_surfaces().contains(id)
    }

    fn surface_count(&self) -> usize {
        self.lock_surfaces().len()
    }

    fn pending_timers(&self) -> usize {
        self.lock_timers().len()
    }

    fn name(&self) -> &'static str {
        "main"
    }
}
