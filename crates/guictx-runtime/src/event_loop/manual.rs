//! Virtual-clock event loop
//!
//! `ManualLoop` never sleeps. `run` only marks the loop as running and
//! returns, so `Context::start` comes straight back; time then moves only
//! when the owner calls [`ManualLoop::advance`]. This makes timer-driven
//! behavior deterministic in tests, and lets a Context be pumped from inside
//! some other loop.
//!
//! Every `call_later` is recorded as a [`Registration`] so callers can check
//! exactly what reached the timer and when.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{Duration, Instant};

use guictx_core::{Callback, EventLoop, SurfaceId, ThreadTag, TimerHandle};

use super::SurfaceRegistry;
use crate::timer::{self, TimerQueue};

/// One recorded `call_later`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub handle: TimerHandle,
    /// Delay as requested
    pub delay: Duration,
    /// Virtual time at which it was registered
    pub registered_at: Duration,
}

struct ManualState {
    timers: TimerQueue,
    elapsed: Duration,
    registrations: Vec<Registration>,
}

/// Loop driven explicitly through `advance`
pub struct ManualLoop {
    origin: Instant,
    state: Mutex<ManualState>,
    surfaces: Mutex<SurfaceRegistry>,
    running: AtomicBool,
    stopped: AtomicBool,
    runs: AtomicUsize,

    /// Thread that entered `run`; the only one allowed to fire timers
    driver: OnceLock<ThreadTag>,
}

impl ManualLoop {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            state: Mutex::new(ManualState {
                timers: TimerQueue::new(),
                elapsed: Duration::ZERO,
                registrations: Vec::new(),
            }),
            surfaces: Mutex::new(SurfaceRegistry::new()),
            running: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            runs: AtomicUsize::new(0),
            driver: OnceLock::new(),
        }
    }

    /// Move the virtual clock forward by `by`, firing due timers
    ///
    /// Timers fire one at a time in deadline order with the clock set to
    /// their deadline, so timers registered by a callback fire in the same
    /// call if they fall inside the window. Nothing fires unless the loop is
    /// running. Returns the number of callbacks fired.
    ///
    /// Callbacks run on the calling thread, so only the thread that entered
    /// `run` may advance the loop; from any other thread this logs a warning
    /// and neither fires nor moves the clock.
    pub fn advance(&self, by: Duration) -> usize {
        if let Some(driver) = self.driver.get() {
            if !driver.is_current() {
                tracing::warn!(driver = %driver, "ManualLoop::advance ignored off the loop thread");
                return 0;
            }
        }

        let target = self.lock_state().elapsed + by;
        let mut fired = 0;

        while self.is_running() {
            let entry = {
                let mut state = self.lock_state();
                let Some(entry) = state.timers.pop_due(self.origin + target) else {
                    break;
                };
                let at = entry.deadline.saturating_duration_since(self.origin);
                state.elapsed = state.elapsed.max(at);
                entry
            };
            timer::fire(entry, self.name());
            fired += 1;
        }

        let mut state = self.lock_state();
        state.elapsed = state.elapsed.max(target);
        fired
    }

    /// Advance in `step` increments until `total` has elapsed
    ///
    /// A zero `step` advances by `total` in one go.
    pub fn advance_by_steps(&self, total: Duration, step: Duration) -> usize {
        if step.is_zero() {
            return self.advance(total);
        }
        let mut remaining = total;
        let mut fired = 0;
        while !remaining.is_zero() {
            let slice = remaining.min(step);
            fired += self.advance(slice);
            remaining -= slice;
        }
        fired
    }

    /// Current virtual time since the loop was created
    pub fn now(&self) -> Duration {
        self.lock_state().elapsed
    }

    /// Every `call_later` so far, in registration order
    pub fn registrations(&self) -> Vec<Registration> {
        self.lock_state().registrations.clone()
    }

    /// Thread that entered `run`, if any
    pub fn driver(&self) -> Option<&ThreadTag> {
        self.driver.get()
    }

    /// How many times `run` has been entered
    pub fn run_count(&self) -> usize {
        self.runs.load(Ordering::Acquire)
    }

    /// Whether `quit` has been requested
    pub fn is_quit(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    fn lock_state(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_surfaces(&self) -> MutexGuard<'_, SurfaceRegistry> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop for ManualLoop {
    fn call_later(&self, delay: Duration, callback: Callback) -> TimerHandle {
        let mut state = self.lock_state();
        let registered_at = state.elapsed;
        let handle = state
            .timers
            .insert(self.origin + registered_at + delay, callback);
        state.registrations.push(Registration {
            handle,
            delay,
            registered_at,
        });
        handle
    }

    fn run(&self) {
        if self.is_quit() {
            return;
        }
        let _ = self.driver.set(ThreadTag::current());
        self.runs.fetch_add(1, Ordering::AcqRel);
        self.running.store(true, Ordering::Release);
    }

    fn quit(&self) {
        self.stopped.store(true, Ordering::Release);
        self.running.store(false, Ordering::Release);
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
        self.lock_state().timers.len()
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}
