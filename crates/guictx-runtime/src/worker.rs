//! Worker threads
//!
//! A worker is a plain OS thread bound to the Context that spawned it. The
//! binding is written before the worker's body runs, so the global helpers
//! resolve to the spawning Context from the first line of the body onward.

use std::cell::Cell;
use std::thread::{self, JoinHandle, Thread};

use guictx_core::{ContextError, ContextId, ContextResult, WorkerId};

use crate::context::Context;
use crate::tls;

thread_local! {
    static CURRENT_WORKER_ID: Cell<Option<WorkerId>> = const { Cell::new(None) };
}

/// Id of the worker running on this thread, if any
#[inline]
pub fn current_worker_id() -> Option<WorkerId> {
    CURRENT_WORKER_ID.with(Cell::get)
}

/// Handle to a spawned worker thread
#[derive(Debug)]
pub struct WorkerHandle {
    id: WorkerId,
    context: ContextId,
    name: String,
    handle: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Context the worker is bound to
    pub fn context_id(&self) -> ContextId {
        self.context
    }

    /// OS thread name, `<prefix>-<n>`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thread(&self) -> &Thread {
        self.handle.thread()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker to finish
    ///
    /// Returns the panic payload if the worker body panicked.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// Spawn a worker bound to `context` running `f`
pub(crate) fn spawn<F>(context: &Context, f: F) -> ContextResult<WorkerHandle>
where
    F: FnOnce() + Send + 'static,
{
    // Taken before the spawn; a failed spawn leaves a gap in the numbering.
    let id = context.next_worker_id();
    let name = format!("{}-{}", context.config().worker_prefix, id);
    let context_id = context.id();
    let weak = context.downgrade();

    let handle = thread::Builder::new()
        .name(name.clone())
        .spawn(move || {
            if let Err(e) = tls::bind_weak(context_id, weak) {
                tracing::error!(context = %context_id, worker = %id, "worker binding failed: {}", e);
                return;
            }
            CURRENT_WORKER_ID.with(|cell| cell.set(Some(id)));
            tracing::trace!(context = %context_id, worker = %id, "worker started");
            f();
        })
        .map_err(|e| ContextError::WorkerSpawn {
            name: name.clone(),
            reason: e.to_string(),
        })?;

    context.note_worker_spawned();
    tracing::debug!(context = %context_id, worker = %name, "worker spawned");

    Ok(WorkerHandle {
        id,
        context: context_id,
        name,
        handle,
    })
}
