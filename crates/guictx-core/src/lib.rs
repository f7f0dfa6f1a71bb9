//! # guictx-core
//!
//! Core types and traits for guictx, a small framework that lets worker
//! threads talk to a GUI event loop that may only be touched from one thread.
//!
//! This crate has no knowledge of any concrete event loop. Loop
//! implementations and the `Context` itself live in `guictx-runtime`.
//!
//! ## Modules
//!
//! - `id` - Context, surface, timer and worker identifiers, thread tags
//! - `task` - `Task` and `DeferredCall`, the units of deferred work
//! - `error` - `ContextError` and the `ContextResult` alias
//! - `traits` - `EventLoop`, the interface to the underlying loop
//! - `env` - Environment variable helpers used by configuration

pub mod id;
pub mod task;
pub mod error;
pub mod traits;
pub mod env;

// Re-exports for convenience
pub use id::{ContextId, SurfaceId, ThreadTag, TimerHandle, WorkerId};
pub use task::{panic_message, Callback, DeferredCall, Task, TaskPanic};
pub use error::{ContextError, ContextResult};
pub use traits::EventLoop;
pub use env::{env_get, env_get_bool, env_get_str};

/// Default timing and naming constants
pub mod constants {
    /// Interval between task-queue drains on the loop thread
    pub const DEFAULT_TASKS_INTERVAL_MS: u64 = 50;

    /// Interval between surface liveness checks
    pub const DEFAULT_WINDOWS_INTERVAL_MS: u64 = 300;

    /// Thread name prefix for spawned workers
    pub const DEFAULT_WORKER_PREFIX: &str = "guictx-worker";
}
