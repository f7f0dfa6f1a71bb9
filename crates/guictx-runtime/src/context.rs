//! The Context: owner of the loop thread
//!
//! A Context is created on the thread that will run the GUI loop. It binds
//! itself to that thread, buffers delayed calls until the loop starts, and
//! accepts tasks from any thread. Two self re-arming handlers run on the loop
//! thread: one drains the task queue, the other stops the loop once no GUI
//! surface is left.
//!
//! ```text
//!   worker ──enqueue──►  SegQueue<Task>  ──drain tick──►  loop thread
//!   any    ──schedule─►  Vec<DeferredCall> ──start()──►  EventLoop::call_later
//!   loop   ──schedule─────────────────────────────────►  EventLoop::call_later
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};
use std::time::Duration;

use crossbeam_queue::SegQueue;
use guictx_core::{
    ContextError, ContextId, ContextResult, DeferredCall, EventLoop, Task, TaskPanic, ThreadTag,
    WorkerId,
};

use crate::config::ContextConfig;
use crate::event_loop::MainLoop;
use crate::stats::{ContextStats, StatsCounters};
use crate::tls;
use crate::worker::{self, WorkerHandle};

pub(crate) struct ContextInner {
    id: ContextId,
    config: ContextConfig,

    /// Thread that constructed the Context
    init_thread: ThreadTag,

    /// Thread running the loop, set once by `start`
    loop_thread: OnceLock<ThreadTag>,

    started: AtomicBool,

    /// Multi-producer task queue, drained on the loop thread only
    tasks: SegQueue<Task>,

    /// Calls scheduled before start; `None` once the loop has started
    deferred: Mutex<Option<Vec<DeferredCall>>>,

    event_loop: Arc<dyn EventLoop>,
    next_worker: AtomicU32,
    stats: StatsCounters,
}

/// Handle to a Context
///
/// Cheap to clone and safe to share; clones refer to the same Context.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Context {
    /// Create a Context with configuration from the environment
    pub fn new() -> ContextResult<Self> {
        Self::with_config(ContextConfig::from_env())
    }

    /// Create a Context on a new real-time `MainLoop`
    pub fn with_config(config: ContextConfig) -> ContextResult<Self> {
        Self::with_event_loop(config, Arc::new(MainLoop::new()))
    }

    /// Create a Context on top of an existing loop
    ///
    /// Fails with `DuplicateContext` if the calling thread already belongs
    /// to a live Context. Nothing is created on failure.
    pub fn with_event_loop(
        config: ContextConfig,
        event_loop: Arc<dyn EventLoop>,
    ) -> ContextResult<Self> {
        config.validate().map_err(ContextError::InvalidConfig)?;
        tls::ensure_unbound()?;

        let context = Context {
            inner: Arc::new(ContextInner {
                id: ContextId::next(),
                config,
                init_thread: ThreadTag::current(),
                loop_thread: OnceLock::new(),
                started: AtomicBool::new(false),
                tasks: SegQueue::new(),
                deferred: Mutex::new(Some(Vec::new())),
                event_loop,
                next_worker: AtomicU32::new(1),
                stats: StatsCounters::default(),
            }),
        };
        tls::bind(&context)?;

        // Buffered until start, drain first.
        context.arm_drain_handler()?;
        context.arm_liveness_handler()?;

        tracing::info!(
            context = %context.id(),
            thread = %context.inner.init_thread,
            event_loop = context.inner.event_loop.name(),
            "context created"
        );
        Ok(context)
    }

    pub(crate) fn from_inner(inner: Arc<ContextInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<ContextInner> {
        Arc::downgrade(&self.inner)
    }

    /// Start the loop on the constructing thread
    ///
    /// Replays every call scheduled so far, in registration order, then
    /// blocks in the loop until it stops. Fails with `ThreadAffinity` on any
    /// other thread and with `AlreadyStarted` the second time; in both cases
    /// the loop is not entered.
    pub fn start(&self) -> ContextResult<()> {
        let inner = &self.inner;
        if !inner.init_thread.is_current() {
            return Err(ContextError::affinity("start", inner.init_thread.clone()));
        }

        let replay = {
            let mut deferred = self.lock_deferred();
            let Some(replay) = deferred.take() else {
                return Err(ContextError::AlreadyStarted(inner.id));
            };
            // Set under the lock so a concurrent `schedule` sees either the
            // buffer or a fully started Context.
            let _ = inner.loop_thread.set(ThreadTag::current());
            inner.started.store(true, Ordering::Release);
            replay
        };

        let replayed = replay.len();
        for call in replay {
            let (delay, callback) = call.into_parts();
            inner.event_loop.call_later(delay, callback);
            StatsCounters::bump(&inner.stats.deferred_replayed);
        }

        tracing::info!(context = %inner.id, replayed, "context started");
        inner.event_loop.run();
        tracing::info!(context = %inner.id, "event loop exited");
        Ok(())
    }

    /// Schedule `f` to run on the loop after `delay`
    ///
    /// Before start this only buffers the call and is legal from any thread.
    /// After start it is legal only on the loop thread and goes straight to
    /// the loop's timer.
    pub fn schedule<F>(&self, delay: Duration, f: F) -> ContextResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut deferred = self.lock_deferred();
            if let Some(pending) = deferred.as_mut() {
                pending.push(DeferredCall::new(delay, f));
                return Ok(());
            }
        }

        self.ensure_gui_thread("schedule")?;
        let handle = self.inner.event_loop.call_later(delay, Box::new(f));
        tracing::trace!(context = %self.inner.id, timer = handle.raw(), ?delay, "scheduled");
        Ok(())
    }

    /// `schedule` with the delay in milliseconds
    pub fn schedule_ms<F>(&self, delay_ms: u64, f: F) -> ContextResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule(Duration::from_millis(delay_ms), f)
    }

    /// Queue `f` to run on the loop thread at the next drain
    ///
    /// Callable from any thread; never blocks and never waits for `f`.
    pub fn enqueue<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.tasks.push(Task::new(f));
        StatsCounters::bump(&self.inner.stats.tasks_enqueued);
    }

    /// Run `f` on a new OS thread bound to this Context
    pub fn spawn_worker<F>(&self, f: F) -> ContextResult<WorkerHandle>
    where
        F: FnOnce() + Send + 'static,
    {
        worker::spawn(self, f)
    }

    /// Stop the loop; loop thread only
    pub fn quit(&self) -> ContextResult<()> {
        self.ensure_gui_thread("quit")?;
        tracing::info!(context = %self.inner.id, "quit requested");
        self.inner.event_loop.quit();
        Ok(())
    }

    pub fn id(&self) -> ContextId {
        self.inner.id
    }

    pub fn config(&self) -> &ContextConfig {
        &self.inner.config
    }

    pub fn event_loop(&self) -> &Arc<dyn EventLoop> {
        &self.inner.event_loop
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.load(Ordering::Acquire)
    }

    pub fn init_thread(&self) -> &ThreadTag {
        &self.inner.init_thread
    }

    pub fn loop_thread(&self) -> Option<&ThreadTag> {
        self.inner.loop_thread.get()
    }

    /// Thread allowed to touch GUI state: the loop thread once started,
    /// the constructing thread before that
    pub fn gui_thread(&self) -> &ThreadTag {
        self.inner.loop_thread.get().unwrap_or(&self.inner.init_thread)
    }

    #[inline]
    pub fn is_gui_thread(&self) -> bool {
        self.gui_thread().is_current()
    }

    /// Tasks waiting for a drain
    pub fn pending_tasks(&self) -> usize {
        self.inner.tasks.len()
    }

    /// Calls buffered for replay (0 once started)
    pub fn pending_deferred(&self) -> usize {
        self.lock_deferred().as_ref().map_or(0, Vec::len)
    }

    pub fn stats(&self) -> ContextStats {
        self.inner.stats.snapshot()
    }

    pub(crate) fn ensure_gui_thread(&self, operation: &'static str) -> ContextResult<()> {
        if self.is_gui_thread() {
            Ok(())
        } else {
            Err(ContextError::affinity(operation, self.gui_thread().clone()))
        }
    }

    pub(crate) fn next_worker_id(&self) -> WorkerId {
        WorkerId::new(self.inner.next_worker.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) fn note_worker_spawned(&self) {
        StatsCounters::bump(&self.inner.stats.workers_spawned);
    }

    fn lock_deferred(&self) -> MutexGuard<'_, Option<Vec<DeferredCall>>> {
        self.inner.deferred.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn arm_drain_handler(&self) -> ContextResult<()> {
        let weak = self.downgrade();
        self.schedule(self.inner.config.tasks_interval, move || drain_tick(weak))
    }

    fn arm_liveness_handler(&self) -> ContextResult<()> {
        let weak = self.downgrade();
        self.schedule(self.inner.config.windows_interval, move || liveness_tick(weak))
    }

    /// Run the tasks queued at the start of this call
    ///
    /// Tasks enqueued while draining wait for the next tick. With panic
    /// isolation off, the first panic ends the batch and is returned; the
    /// remaining tasks stay queued.
    fn drain_pending(&self) -> Result<usize, TaskPanic> {
        let inner = &self.inner;
        let batch = inner.tasks.len();
        let mut ran = 0;

        for _ in 0..batch {
            let Some(task) = inner.tasks.pop() else {
                break;
            };
            ran += 1;
            match task.run_isolated() {
                Ok(()) => StatsCounters::bump(&inner.stats.tasks_run),
                Err(panic) => {
                    StatsCounters::bump(&inner.stats.tasks_panicked);
                    if !inner.config.isolate_task_panics {
                        StatsCounters::bump(&inner.stats.drain_ticks);
                        return Err(panic);
                    }
                    tracing::error!(context = %inner.id, "{}", panic);
                }
            }
        }

        StatsCounters::bump(&inner.stats.drain_ticks);
        if inner.config.debug_logging && ran > 0 {
            tracing::debug!(context = %inner.id, ran, left = inner.tasks.len(), "drained tasks");
        }
        Ok(ran)
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Context {}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.inner.id)
            .field("started", &self.is_started())
            .field("pending_tasks", &self.pending_tasks())
            .field("event_loop", &self.inner.event_loop.name())
            .finish()
    }
}

/// Drain handler body; re-arms itself while the Context exists
fn drain_tick(weak: Weak<ContextInner>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let context = Context { inner };
    let outcome = context.drain_pending();

    if let Err(e) = context.arm_drain_handler() {
        tracing::error!(context = %context.id(), "failed to re-arm drain handler: {}", e);
    }
    if let Err(panic) = outcome {
        // Handler is re-armed already; let the loop see the failure.
        std::panic::resume_unwind(panic.into_payload());
    }
}

/// Liveness handler body; stops the loop once no surface is attached
fn liveness_tick(weak: Weak<ContextInner>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let context = Context { inner };
    StatsCounters::bump(&context.inner.stats.liveness_checks);

    let surfaces = context.inner.event_loop.surface_count();
    if context.inner.config.debug_logging {
        tracing::debug!(context = %context.id(), surfaces, "liveness check");
    }
    if surfaces == 0 {
        tracing::info!(context = %context.id(), "no surfaces left, stopping event loop");
        context.inner.event_loop.quit();
        return;
    }

    if let Err(e) = context.arm_liveness_handler() {
        tracing::error!(context = %context.id(), "failed to re-arm liveness handler: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_loop::{MainLoop, ManualLoop};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;

    const TICK: Duration = Duration::from_millis(50);
    const LIVENESS: Duration = Duration::from_millis(300);

    fn manual_context() -> (Context, Arc<ManualLoop>) {
        manual_context_with(ContextConfig::default())
    }

    fn manual_context_with(config: ContextConfig) -> (Context, Arc<ManualLoop>) {
        let event_loop = Arc::new(ManualLoop::new());
        let context = Context::with_event_loop(config, event_loop.clone()).unwrap();
        (context, event_loop)
    }

    /// Keep the liveness handler from stopping the loop
    fn keep_alive(event_loop: &ManualLoop) {
        event_loop.attach_surface(None, "keep-alive");
    }

    #[test]
    fn test_construction_buffers_both_handlers() {
        let (context, event_loop) = manual_context();
        assert!(!context.is_started());
        assert_eq!(context.pending_deferred(), 2);
        assert!(event_loop.registrations().is_empty());
        assert!(tls::is_bound());
        assert_eq!(tls::bound_context_id(), Some(context.id()));
    }

    #[test]
    fn test_duplicate_context_rejected() {
        let (first, _event_loop) = manual_context();
        first.enqueue(|| {});

        let err = Context::with_event_loop(ContextConfig::default(), Arc::new(ManualLoop::new()))
            .unwrap_err();
        match err {
            ContextError::DuplicateContext { existing, .. } => assert_eq!(existing, first.id()),
            other => panic!("expected DuplicateContext, got {:?}", other),
        }

        // The existing Context is untouched.
        assert_eq!(tls::current_context().unwrap(), first);
        assert_eq!(first.pending_tasks(), 1);
        assert_eq!(first.pending_deferred(), 2);
    }

    #[test]
    fn test_invalid_config_creates_nothing() {
        let err = Context::with_event_loop(
            ContextConfig::default().tasks_interval(Duration::ZERO),
            Arc::new(ManualLoop::new()),
        )
        .unwrap_err();
        assert_eq!(err, ContextError::InvalidConfig("tasks_interval must be non-zero"));
        assert!(!tls::is_bound());
    }

    #[test]
    fn test_with_config_builds_main_loop() {
        let context = Context::with_config(ContextConfig::default()).unwrap();
        assert_eq!(context.event_loop().name(), "main");
        assert!(!context.event_loop().is_running());
    }

    #[test]
    fn test_with_config_rejects_invalid_config() {
        let err = Context::with_config(ContextConfig::default().worker_prefix(""))
            .unwrap_err();
        assert_eq!(err, ContextError::InvalidConfig("worker_prefix must not be empty"));
        assert!(!tls::is_bound());
    }

    #[test]
    fn test_new_context_after_previous_dropped() {
        let (first, _) = manual_context();
        let first_id = first.id();
        drop(first);

        assert!(matches!(
            tls::current_context(),
            Err(ContextError::InvalidContext { .. })
        ));
        let (second, _) = manual_context();
        assert_ne!(second.id(), first_id);
        assert_eq!(tls::current_context().unwrap(), second);
    }

    #[test]
    fn test_start_from_other_thread_fails() {
        let (context, event_loop) = manual_context();
        let remote = context.clone();
        let err = std::thread::spawn(move || remote.start())
            .join()
            .unwrap()
            .unwrap_err();

        assert!(matches!(err, ContextError::ThreadAffinity { operation: "start", .. }));
        assert!(!context.is_started());
        assert_eq!(event_loop.run_count(), 0);
        assert!(event_loop.registrations().is_empty());
        assert_eq!(context.pending_deferred(), 2);
    }

    #[test]
    fn test_start_twice_fails() {
        let (context, event_loop) = manual_context();
        context.start().unwrap();
        assert_eq!(
            context.start().unwrap_err(),
            ContextError::AlreadyStarted(context.id())
        );
        assert_eq!(event_loop.run_count(), 1);
    }

    #[test]
    fn test_prestart_calls_replayed_once_in_order() {
        let (context, event_loop) = manual_context();
        context.schedule(Duration::from_millis(10), || {}).unwrap();
        context.schedule(Duration::from_millis(5), || {}).unwrap();
        assert!(event_loop.registrations().is_empty());

        context.start().unwrap();
        let delays: Vec<Duration> = event_loop.registrations().iter().map(|r| r.delay).collect();
        assert_eq!(
            delays,
            vec![TICK, LIVENESS, Duration::from_millis(10), Duration::from_millis(5)]
        );
        assert_eq!(context.stats().deferred_replayed, 4);
        assert_eq!(context.pending_deferred(), 0);
        assert_eq!(context.loop_thread(), Some(&ThreadTag::current()));
    }

    #[test]
    fn test_prestart_schedule_from_worker_thread() {
        let (context, event_loop) = manual_context();
        let remote = context.clone();
        std::thread::spawn(move || remote.schedule(Duration::from_millis(7), || {}))
            .join()
            .unwrap()
            .unwrap();

        context.start().unwrap();
        assert!(event_loop
            .registrations()
            .iter()
            .any(|r| r.delay == Duration::from_millis(7)));
    }

    #[test]
    fn test_poststart_schedule_thread_affinity() {
        let (context, event_loop) = manual_context();
        context.start().unwrap();
        let before = event_loop.registrations().len();

        let remote = context.clone();
        let err = std::thread::spawn(move || remote.schedule(Duration::from_millis(1), || {}))
            .join()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, ContextError::ThreadAffinity { operation: "schedule", .. }));
        assert_eq!(event_loop.registrations().len(), before);

        context.schedule_ms(1, || {}).unwrap();
        assert_eq!(event_loop.registrations().len(), before + 1);
    }

    #[test]
    fn test_drain_runs_tasks_on_tick() {
        let (context, event_loop) = manual_context();
        keep_alive(&event_loop);
        let log = Arc::new(StdMutex::new(Vec::new()));
        for i in 0..5 {
            let log = Arc::clone(&log);
            context.enqueue(move || log.lock().unwrap().push(i));
        }
        context.start().unwrap();

        event_loop.advance(TICK - Duration::from_millis(1));
        assert!(log.lock().unwrap().is_empty());

        event_loop.advance(Duration::from_millis(1));
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
        let stats = context.stats();
        assert_eq!(stats.tasks_enqueued, 5);
        assert_eq!(stats.tasks_run, 5);
        assert_eq!(stats.drain_ticks, 1);
    }

    #[test]
    fn test_tasks_enqueued_mid_drain_wait_for_next_tick() {
        let (context, event_loop) = manual_context();
        keep_alive(&event_loop);
        let hits = Arc::new(AtomicUsize::new(0));

        let (ctx, h) = (context.clone(), Arc::clone(&hits));
        context.enqueue(move || {
            h.fetch_add(1, Ordering::SeqCst);
            let h = Arc::clone(&h);
            ctx.enqueue(move || {
                h.fetch_add(10, Ordering::SeqCst);
            });
        });
        context.start().unwrap();

        event_loop.advance(TICK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(context.pending_tasks(), 1);

        event_loop.advance(TICK);
        assert_eq!(hits.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn test_isolated_panic_keeps_draining() {
        let (context, event_loop) = manual_context();
        keep_alive(&event_loop);
        let hits = Arc::new(AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        context.enqueue(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        context.enqueue(|| panic!("task failure"));
        let h = Arc::clone(&hits);
        context.enqueue(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        context.start().unwrap();

        event_loop.advance(TICK);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        let stats = context.stats();
        assert_eq!(stats.tasks_run, 2);
        assert_eq!(stats.tasks_panicked, 1);

        // Still draining afterwards.
        let h = Arc::clone(&hits);
        context.enqueue(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        event_loop.advance(TICK);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unisolated_panic_aborts_batch_but_rearms() {
        let (context, event_loop) =
            manual_context_with(ContextConfig::default().isolate_task_panics(false));
        keep_alive(&event_loop);
        let hits = Arc::new(AtomicUsize::new(0));

        context.enqueue(|| panic!("task failure"));
        let h = Arc::clone(&hits);
        context.enqueue(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        context.start().unwrap();

        event_loop.advance(TICK);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(context.pending_tasks(), 1);
        assert_eq!(context.stats().tasks_panicked, 1);

        event_loop.advance(TICK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(context.pending_tasks(), 0);
    }

    #[test]
    fn test_drain_stays_on_loop_thread_when_advanced_elsewhere() {
        let (context, event_loop) = manual_context();
        keep_alive(&event_loop);
        let ran_on = Arc::new(StdMutex::new(None));
        let slot = Arc::clone(&ran_on);
        context.enqueue(move || *slot.lock().unwrap() = Some(ThreadTag::current()));
        context.start().unwrap();

        let remote = Arc::clone(&event_loop);
        let fired = std::thread::spawn(move || remote.advance(TICK)).join().unwrap();
        assert_eq!(fired, 0);
        assert_eq!(context.pending_tasks(), 1);

        event_loop.advance(TICK);
        assert_eq!(ran_on.lock().unwrap().as_ref(), Some(&ThreadTag::current()));
        // Drain handler re-armed on the loop thread.
        event_loop.advance(TICK);
        assert_eq!(context.stats().drain_ticks, 2);
    }

    #[test]
    fn test_liveness_stops_loop_without_surfaces() {
        let (context, event_loop) = manual_context();
        context.start().unwrap();
        assert!(event_loop.is_running());

        event_loop.advance(LIVENESS - Duration::from_millis(1));
        assert!(event_loop.is_running());

        event_loop.advance(Duration::from_millis(1));
        assert!(!event_loop.is_running());
        assert_eq!(context.stats().liveness_checks, 1);
    }

    #[test]
    fn test_liveness_stops_loop_within_one_period_of_last_close() {
        let (context, event_loop) = manual_context();
        let surface = event_loop.attach_surface(None, "main");
        context.start().unwrap();

        event_loop.advance(Duration::from_millis(1000));
        assert!(event_loop.is_running());

        event_loop.detach_surface(surface);
        event_loop.advance(LIVENESS);
        assert!(!event_loop.is_running());
    }

    #[test]
    fn test_quit_requires_loop_thread() {
        let (context, event_loop) = manual_context();
        context.start().unwrap();

        let remote = context.clone();
        let err = std::thread::spawn(move || remote.quit()).join().unwrap().unwrap_err();
        assert!(matches!(err, ContextError::ThreadAffinity { operation: "quit", .. }));
        assert!(event_loop.is_running());

        context.quit().unwrap();
        assert!(!event_loop.is_running());
    }

    #[test]
    fn test_handlers_stop_when_context_dropped() {
        let (context, event_loop) = manual_context();
        keep_alive(&event_loop);
        context.start().unwrap();
        drop(context);

        // Handlers hold weak references: they fire once more and do not re-arm.
        event_loop.advance(LIVENESS);
        assert_eq!(event_loop.pending_timers(), 0);
    }

    #[test]
    fn test_main_loop_runs_tasks_from_workers() {
        let config = ContextConfig::default()
            .tasks_interval(Duration::from_millis(5))
            .windows_interval(Duration::from_millis(20));
        let event_loop = Arc::new(MainLoop::new());
        let context = Context::with_event_loop(config, event_loop.clone()).unwrap();
        let surface = event_loop.attach_surface(None, "main");

        let ran_on = Arc::new(StdMutex::new(None));
        let (ctx, slot) = (context.clone(), Arc::clone(&ran_on));
        let worker = context
            .spawn_worker(move || {
                let el = Arc::clone(ctx.event_loop());
                ctx.enqueue(move || {
                    *slot.lock().unwrap() = Some(ThreadTag::current());
                    el.detach_surface(surface);
                });
            })
            .unwrap();

        context.start().unwrap();
        worker.join().unwrap();
        assert_eq!(ran_on.lock().unwrap().as_ref(), Some(&ThreadTag::current()));
        assert_eq!(context.stats().tasks_run, 1);
    }

    #[test]
    fn test_debug_format() {
        let (context, _) = manual_context();
        let text = format!("{:?}", context);
        assert!(text.contains("started: false"));
        assert!(text.contains("\"manual\""));
    }
}
