//! One-shot timer queue shared by the event loop implementations
//!
//! ```text
//!   Context::schedule / replay on start
//!                 │
//!                 ▼
//!        EventLoop::call_later
//!                 │
//!                 ▼
//!   ┌───────────────────────────┐
//!   │  TimerQueue (min-heap)    │  deadline, then handle
//!   └───────────────────────────┘
//!                 │ take_expired / pop_due
//!                 ▼
//!        fire() on the loop thread
//! ```
//!
//! The queue itself is not synchronized; each loop keeps it behind its own
//! mutex and always fires callbacks with that mutex released, so a callback
//! may register further timers.

mod entry;
mod heap;

pub use entry::TimerEntry;
pub use heap::{TimerQueue, TimerQueueStats};

use guictx_core::panic_message;
use std::panic::{self, AssertUnwindSafe};

/// Run a timer's callback, reporting a panic instead of unwinding
///
/// Returns false if the callback panicked.
pub(crate) fn fire(entry: TimerEntry, loop_name: &'static str) -> bool {
    let handle = entry.handle;
    match panic::catch_unwind(AssertUnwindSafe(entry.callback)) {
        Ok(()) => true,
        Err(payload) => {
            tracing::error!(
                event_loop = loop_name,
                timer = handle.raw(),
                "timer callback panicked: {}",
                panic_message(payload.as_ref())
            );
            false
        }
    }
}
