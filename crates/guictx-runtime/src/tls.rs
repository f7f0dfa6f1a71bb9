//! Thread-local context binding
//!
//! Each OS thread has one slot naming the Context it belongs to. The slot is
//! written when the thread starts being a context thread (the thread that
//! constructs a Context, or a worker right before its body runs) and is only
//! read afterwards. It holds a weak reference, so a binding never keeps a
//! Context alive; a binding whose Context is gone is *stale*.

use std::cell::RefCell;
use std::sync::Weak;

use guictx_core::{ContextError, ContextId, ContextResult, ThreadTag};

use crate::context::{Context, ContextInner};

struct Binding {
    id: ContextId,
    context: Weak<ContextInner>,
}

thread_local! {
    /// Context owning this OS thread
    static BOUND_CONTEXT: RefCell<Option<Binding>> = const { RefCell::new(None) };
}

/// Fail with `DuplicateContext` if a live Context is bound to this thread
pub(crate) fn ensure_unbound() -> ContextResult<()> {
    BOUND_CONTEXT.with(|slot| match slot.borrow().as_ref() {
        Some(binding) if binding.context.strong_count() > 0 => Err(ContextError::DuplicateContext {
            existing: binding.id,
            thread: ThreadTag::current(),
        }),
        _ => Ok(()),
    })
}

/// Bind the calling thread to `context`
///
/// Only an empty or stale slot can be written.
pub(crate) fn bind(context: &Context) -> ContextResult<()> {
    bind_weak(context.id(), context.downgrade())
}

pub(crate) fn bind_weak(id: ContextId, context: Weak<ContextInner>) -> ContextResult<()> {
    ensure_unbound()?;
    BOUND_CONTEXT.with(|slot| {
        *slot.borrow_mut() = Some(Binding { id, context });
    });
    Ok(())
}

/// The Context bound to the calling thread
///
/// Fails with `NoContextBound` on an unbound thread and `InvalidContext` when
/// the bound Context has been dropped.
pub fn current_context() -> ContextResult<Context> {
    BOUND_CONTEXT.with(|slot| match slot.borrow().as_ref() {
        None => Err(ContextError::NoContextBound {
            thread: ThreadTag::current(),
        }),
        Some(binding) => binding
            .context
            .upgrade()
            .map(Context::from_inner)
            .ok_or_else(|| ContextError::InvalidContext {
                context: binding.id,
                thread: ThreadTag::current(),
            }),
    })
}

/// Id recorded in this thread's slot, stale or not
pub fn bound_context_id() -> Option<ContextId> {
    BOUND_CONTEXT.with(|slot| slot.borrow().as_ref().map(|b| b.id))
}

/// Whether this thread is bound to a live Context
#[inline]
pub fn is_bound() -> bool {
    BOUND_CONTEXT.with(|slot| {
        slot.borrow()
            .as_ref()
            .is_some_and(|b| b.context.strong_count() > 0)
    })
}
