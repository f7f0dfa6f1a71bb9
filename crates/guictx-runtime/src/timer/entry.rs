//! Timer entry type

use std::fmt;
use std::time::{Duration, Instant};

use guictx_core::{Callback, TimerHandle};

/// A registered one-shot timer
///
/// Contains everything needed to:
/// 1. Order it against other timers (deadline, then handle)
/// 2. Run it when due (callback)
pub struct TimerEntry {
    /// Issued by the owning queue in registration order
    pub handle: TimerHandle,

    /// When this timer should fire
    pub deadline: Instant,

    /// What to run
    pub callback: Callback,
}

impl TimerEntry {
    pub fn new(handle: TimerHandle, deadline: Instant, callback: Callback) -> Self {
        Self {
            handle,
            deadline,
            callback,
        }
    }

    /// Check if this timer is due at `now`
    #[inline]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Time remaining until the deadline, measured from `now`
    #[inline]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

impl fmt::Debug for TimerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEntry")
            .field("handle", &self.handle)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
