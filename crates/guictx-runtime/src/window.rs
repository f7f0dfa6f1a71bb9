//! GUI surfaces owned by a Context
//!
//! A `Window` is the handle for one surface registered with the Context's
//! event loop. Windows nest: closing a window closes everything created under
//! it. The liveness handler stops the loop once the last surface is gone.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use guictx_core::{ContextResult, SurfaceId};

use crate::context::Context;

/// Where a new Window is attached
#[derive(Clone, Copy)]
pub enum Parent<'a> {
    /// Top-level surface of the Context
    Context(&'a Context),
    /// Child of an existing Window, same Context
    Window(&'a Window),
}

impl Parent<'_> {
    fn context(&self) -> &Context {
        match self {
            Parent::Context(context) => context,
            Parent::Window(window) => &window.context,
        }
    }

    fn surface(&self) -> Option<SurfaceId> {
        match self {
            Parent::Context(_) => None,
            Parent::Window(window) => Some(window.id),
        }
    }
}

impl<'a> From<&'a Context> for Parent<'a> {
    fn from(context: &'a Context) -> Self {
        Parent::Context(context)
    }
}

impl<'a> From<&'a Window> for Parent<'a> {
    fn from(window: &'a Window) -> Self {
        Parent::Window(window)
    }
}

/// Handle to an attached GUI surface
pub struct Window {
    id: SurfaceId,
    parent: Option<SurfaceId>,
    title: String,
    context: Context,
    open: AtomicBool,
}

impl Window {
    /// Attach a new surface under `parent`
    ///
    /// GUI thread only. The owning Context is taken from the parent and kept
    /// for the Window's lifetime.
    pub fn new<'a>(parent: impl Into<Parent<'a>>, title: impl Into<String>) -> ContextResult<Self> {
        let parent = parent.into();
        let context = parent.context().clone();
        context.ensure_gui_thread("Window::new")?;

        let title = title.into();
        let id = context.event_loop().attach_surface(parent.surface(), &title);
        tracing::debug!(context = %context.id(), surface = %id, title = %title, "window opened");

        Ok(Self {
            id,
            parent: parent.surface(),
            title,
            context,
            open: AtomicBool::new(true),
        })
    }

    /// Close this window and every window under it
    ///
    /// GUI thread only. Returns the number of surfaces removed; closing twice
    /// removes nothing.
    pub fn close(&self) -> ContextResult<usize> {
        self.context.ensure_gui_thread("Window::close")?;
        if !self.open.swap(false, Ordering::AcqRel) {
            return Ok(0);
        }
        let removed = self.context.event_loop().detach_surface(self.id);
        tracing::debug!(context = %self.context.id(), surface = %self.id, removed, "window closed");
        Ok(removed)
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Surface this window was created under, if any
    pub fn parent(&self) -> Option<SurfaceId> {
        self.parent
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// False once this window or one of its ancestors was closed
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire) && self.context.event_loop().is_attached(self.id)
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("context", &self.context.id())
            .field("open", &self.open.load(Ordering::Relaxed))
            .finish()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if !self.open.swap(false, Ordering::AcqRel) {
            return;
        }
        let event_loop = self.context.event_loop().clone();
        let id = self.id;

        if self.context.is_gui_thread() {
            event_loop.detach_surface(id);
        } else {
            // Surfaces are only touched on the GUI thread.
            self.context.enqueue(move || {
                event_loop.detach_surface(id);
            });
        }
    }
}
