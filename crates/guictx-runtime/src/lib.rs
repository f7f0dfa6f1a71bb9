//! # guictx-runtime
//!
//! Runtime for guictx.
//!
//! This crate provides:
//! - `Context`, owner of the loop thread and its task queue
//! - Thread-local binding of OS threads to a Context
//! - Worker threads bound to their spawning Context
//! - Two event loops (`MainLoop`, `ManualLoop`) and their timer queue
//! - `Window`, a GUI surface handle tied to a Context

pub mod config;
pub mod context;
pub mod event_loop;
pub mod stats;
pub mod timer;
pub mod tls;
pub mod window;
pub mod worker;

// Re-exports
pub use config::ContextConfig;
pub use context::Context;
pub use event_loop::{MainLoop, ManualLoop, Registration};
pub use stats::ContextStats;
pub use tls::{bound_context_id, current_context, is_bound};
pub use window::{Parent, Window};
pub use worker::{current_worker_id, WorkerHandle};
