//! # guictx - GUI thread affinity for worker threads
//!
//! A GUI toolkit usually allows its widgets to be touched from one thread
//! only. guictx gives that thread a `Context`: worker threads hand closures
//! to the Context, and the loop thread runs them at the next drain tick.
//!
//! ## Quick Start
//!
//! ```ignore
//! use guictx::{Context, Window};
//!
//! fn main() -> guictx::ContextResult<()> {
//!     guictx::init_logging();
//!
//!     let context = Context::new()?;
//!     let window = Window::new(&context, "main")?;
//!
//!     guictx::spawn_worker(move || {
//!         let result = expensive_work();
//!         // Runs on the loop thread
//!         guictx::enqueue(move || println!("done: {}", result)).unwrap();
//!     })?;
//!
//!     // Returns once the last window is closed
//!     context.start()
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────┐  enqueue   ┌──────────────────────────────┐
//! │  Worker threads   │ ─────────► │  Task queue (lock-free)      │
//! │  (bound to ctx)   │            └──────────────────────────────┘
//! └───────────────────┘                         │ drain tick
//!                                               ▼
//! ┌───────────────────┐  schedule  ┌──────────────────────────────┐
//! │  Loop thread      │ ─────────► │  EventLoop timers            │
//! │  (owns surfaces)  │ ◄───────── │  drain / liveness / user     │
//! └───────────────────┘            └──────────────────────────────┘
//! ```
//!
//! The free functions below resolve the Context bound to the calling thread
//! and forward to it. They keep no state of their own.

use std::time::Duration;

// Re-export core types
pub use guictx_core::{
    Callback,
    ContextError,
    ContextId,
    ContextResult,
    DeferredCall,
    EventLoop,
    SurfaceId,
    Task,
    TaskPanic,
    ThreadTag,
    TimerHandle,
    WorkerId,
};

// Re-export env utilities
pub use guictx_core::{env_get, env_get_bool, env_get_str};

// Re-export runtime types
pub use guictx_runtime::{
    current_worker_id,
    Context,
    ContextConfig,
    ContextStats,
    MainLoop,
    ManualLoop,
    Parent,
    Registration,
    Window,
    WorkerHandle,
};

/// Context bound to the calling thread
#[inline]
pub fn current() -> ContextResult<Context> {
    guictx_runtime::current_context()
}

/// Whether the calling thread is bound to a live Context
#[inline]
pub fn is_bound() -> bool {
    guictx_runtime::is_bound()
}

/// Whether the calling thread is the GUI thread of its Context
pub fn is_gui_thread() -> bool {
    current().is_ok_and(|context| context.is_gui_thread())
}

/// Queue `f` on the current thread's Context
///
/// Fails with `NoContextBound` on a thread no Context knows about; nothing
/// is queued in that case.
pub fn enqueue<F>(f: F) -> ContextResult<()>
where
    F: FnOnce() + Send + 'static,
{
    current()?.enqueue(f);
    Ok(())
}

/// Schedule `f` after `delay` on the current thread's Context
pub fn schedule<F>(delay: Duration, f: F) -> ContextResult<()>
where
    F: FnOnce() + Send + 'static,
{
    current()?.schedule(delay, f)
}

/// `schedule` with the delay in milliseconds
pub fn schedule_ms<F>(delay_ms: u64, f: F) -> ContextResult<()>
where
    F: FnOnce() + Send + 'static,
{
    current()?.schedule_ms(delay_ms, f)
}

/// Spawn a worker bound to the current thread's Context
pub fn spawn_worker<F>(f: F) -> ContextResult<WorkerHandle>
where
    F: FnOnce() + Send + 'static,
{
    current()?.spawn_worker(f)
}

/// Install a `tracing` subscriber for guictx and the application
///
/// The filter comes from `GUICTX_LOG` (default `info`), e.g.
/// `GUICTX_LOG=guictx_runtime=debug`. Safe to call more than once; only the
/// first call installs anything, and a subscriber installed elsewhere wins.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("GUICTX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_target(false)
        .try_init();
}
