//! Identifier types
//!
//! Contexts, surfaces, timers and workers are all named by small copyable
//! integers. Threads are named by a [`ThreadTag`], which keeps the std
//! `ThreadId` for comparisons and the name plus OS thread id for messages.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, ThreadId};

/// Unique identifier for a Context
///
/// Allocated from a process-wide counter, never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ContextId(u64);

impl ContextId {
    /// Allocate the next context id
    #[inline]
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        ContextId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextId({})", self.0)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// Identifier of a GUI surface registered with an event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SurfaceId(u64);

impl SurfaceId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        SurfaceId(raw)
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Registration handle returned by `EventLoop::call_later`
///
/// Handles are issued in increasing order by each loop, which is also the
/// tie-break order for timers sharing a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        TimerHandle(raw)
    }

    /// Get the raw handle value (for debugging/logging)
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Per-context worker sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct WorkerId(u32);

impl WorkerId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        WorkerId(raw)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an OS thread, for affinity checks and error messages
///
/// Equality only looks at the std `ThreadId`.
#[derive(Clone)]
pub struct ThreadTag {
    id: ThreadId,
    name: Option<String>,
    os_tid: u64,
}

impl ThreadTag {
    /// Tag for the calling thread
    pub fn current() -> Self {
        let current = thread::current();
        Self {
            id: current.id(),
            name: current.name().map(str::to_owned),
            os_tid: os_thread_id(),
        }
    }

    #[inline]
    pub fn id(&self) -> ThreadId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Kernel-level thread id (0 where unavailable)
    #[inline]
    pub fn os_tid(&self) -> u64 {
        self.os_tid
    }

    /// Whether this tag names the calling thread
    #[inline]
    pub fn is_current(&self) -> bool {
        self.id == thread::current().id()
    }
}

impl PartialEq for ThreadTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ThreadTag {}

impl fmt::Debug for ThreadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadTag")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("os_tid", &self.os_tid)
            .finish()
    }
}

impl fmt::Display for ThreadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "'{}' (tid {})", name, self.os_tid),
            None => write!(f, "<unnamed> (tid {})", self.os_tid),
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        fn os_thread_id() -> u64 {
            // SAFETY: gettid has no preconditions and cannot fail.
            unsafe { libc::syscall(libc::SYS_gettid) as u64 }
        }
    } else if #[cfg(unix)] {
        fn os_thread_id() -> u64 {
            // SAFETY: pthread_self has no preconditions.
            unsafe { libc::pthread_self() as u64 }
        }
    } else {
        fn os_thread_id() -> u64 {
            0
        }
    }
}
