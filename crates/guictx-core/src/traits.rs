//! Event loop interface
//!
//! The Context never renders or lays anything out. It only needs a
//! cooperative loop that can run one-shot timers, stop, and report which GUI
//! surfaces are still attached. Anything providing that implements
//! [`EventLoop`].

use std::time::Duration;

use crate::id::{SurfaceId, TimerHandle};
use crate::task::Callback;

/// The underlying single-threaded event loop
///
/// Implementations must be thread-safe (Send + Sync) because the Context
/// that owns the loop is shared with worker threads. The Context itself
/// guarantees that, once running, the loop is only driven from its loop
/// thread.
pub trait EventLoop: Send + Sync {
    /// Register a one-shot callback to run on the loop after `delay`
    ///
    /// Callbacks sharing a deadline fire in registration order.
    fn call_later(&self, delay: Duration, callback: Callback) -> TimerHandle;

    /// Run the loop on the calling thread until `quit` is called
    fn run(&self);

    /// Ask the loop to stop; `run` returns after the current callback
    fn quit(&self);

    /// True between `run` being entered and the loop stopping
    fn is_running(&self) -> bool;

    /// Register a GUI surface, optionally nested under another one
    fn attach_surface(&self, parent: Option<SurfaceId>, title: &str) -> SurfaceId;

    /// Remove a surface and all surfaces nested under it
    ///
    /// Returns how many surfaces were removed (0 if `id` was unknown).
    fn detach_surface(&self, id: SurfaceId) -> usize;

    /// Whether `id` is still attached
    fn is_attached(&self, id: SurfaceId) -> bool;

    /// Number of attached surfaces
    fn surface_count(&self) -> usize;

    /// Number of registered timers that have not fired yet
    fn pending_timers(&self) -> usize;

    /// Loop name for logging
    fn name(&self) -> &'static str {
        "unknown"
    }
}
