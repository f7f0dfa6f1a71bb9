//! Event loop implementations
//!
//! - `MainLoop` - real-time blocking loop, built by `Context::new`
//! - `ManualLoop` - virtual-clock loop advanced by hand; only usable through
//!   `Context::with_event_loop`, which leaves the caller a typed handle to drive
//!
//! Both share the timer queue from `crate::timer` and the surface registry
//! below. Other loops plug in by implementing `guictx_core::EventLoop`.

mod main_loop;
mod manual;
mod surfaces;

pub use main_loop::MainLoop;
pub use manual::{ManualLoop, Registration};
pub use surfaces::SurfaceRegistry;
