//! Deferred work units
//!
//! A [`Task`] is a closure destined for the loop thread's task queue. A
//! [`DeferredCall`] is a closure plus a delay, buffered by a Context until its
//! loop starts and then handed to the loop's one-shot timer.
//!
//! Both capture their own arguments; there is no separate argument bundle.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use thiserror::Error;

/// Boxed one-shot callback accepted by event loops
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// A single-use invocation destined for the loop thread
///
/// Consumed by `run`/`run_isolated`, so it cannot execute twice. Nothing is
/// returned to the producer.
pub struct Task {
    callback: Callback,
}

impl Task {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Run the task on the calling thread, letting any panic unwind
    #[inline]
    pub fn run(self) {
        (self.callback)()
    }

    /// Run the task, catching a panic instead of unwinding
    pub fn run_isolated(self) -> Result<(), TaskPanic> {
        panic::catch_unwind(AssertUnwindSafe(self.callback)).map_err(TaskPanic::from_payload)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}

/// A panic caught while running a Task
///
/// Keeps the original payload so the unwind can be resumed.
#[derive(Error)]
#[error("task panicked: {message}")]
pub struct TaskPanic {
    message: String,
    payload: Box<dyn Any + Send + 'static>,
}

impl TaskPanic {
    pub fn from_payload(payload: Box<dyn Any + Send + 'static>) -> Self {
        Self {
            message: panic_message(payload.as_ref()),
            payload,
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Hand back the payload, e.g. for `std::panic::resume_unwind`
    pub fn into_payload(self) -> Box<dyn Any + Send + 'static> {
        self.payload
    }
}

impl fmt::Debug for TaskPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskPanic")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Best-effort text of a panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_owned()
    }
}

/// A one-shot call requested with a delay, before or after loop start
pub struct DeferredCall {
    delay: Duration,
    callback: Callback,
}

impl DeferredCall {
    pub fn new<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            delay,
            callback: Box::new(f),
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Split into the pieces an event loop's timer takes
    #[inline]
    pub fn into_parts(self) -> (Duration, Callback) {
        (self.delay, self.callback)
    }
}

impl fmt::Debug for DeferredCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredCall")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
