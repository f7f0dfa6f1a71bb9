//! Error types for guictx
//!
//! Every failure is reported synchronously to the caller and leaves no
//! partial state behind: no queue entry, binding or timer is created by a
//! call that returns an error.

use thiserror::Error;

use crate::id::{ContextId, ThreadTag};

/// Result type for context operations
pub type ContextResult<T> = Result<T, ContextError>;

/// Errors raised by Context operations and the global helpers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A live Context is already bound to the calling thread
    #[error("thread {thread} is already bound to {existing}; only one context may be bound per thread")]
    DuplicateContext {
        existing: ContextId,
        thread: ThreadTag,
    },

    /// Operation restricted to one thread was called from another
    #[error("`{operation}` must be called on thread {expected}, not {actual}")]
    ThreadAffinity {
        operation: &'static str,
        expected: ThreadTag,
        actual: ThreadTag,
    },

    /// Global helper called from a thread with no bound Context
    #[error("thread {thread} is not bound to a context; use a context thread or a worker it spawned")]
    NoContextBound { thread: ThreadTag },

    /// The thread's binding points at a Context that no longer exists
    #[error("thread {thread} is bound to {context}, which has been dropped")]
    InvalidContext {
        context: ContextId,
        thread: ThreadTag,
    },

    /// `start()` called a second time
    #[error("{0} has already been started")]
    AlreadyStarted(ContextId),

    /// Configuration rejected by `ContextConfig::validate`
    #[error("invalid context configuration: {0}")]
    InvalidConfig(&'static str),

    /// The OS refused to create a worker thread
    #[error("failed to spawn worker thread '{name}': {reason}")]
    WorkerSpawn { name: String, reason: String },
}

impl ContextError {
    /// Shorthand for an affinity violation by the calling thread
    pub fn affinity(operation: &'static str, expected: ThreadTag) -> Self {
        ContextError::ThreadAffinity {
            operation,
            expected,
            actual: ThreadTag::current(),
        }
    }

    /// True for errors caused by calling from the wrong thread
    pub fn is_thread_error(&self) -> bool {
        matches!(
            self,
            ContextError::ThreadAffinity { .. }
                | ContextError::DuplicateContext { .. }
                | ContextError::NoContextBound { .. }
        )
    }
}
