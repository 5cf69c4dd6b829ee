//! Process-wide typed publish/subscribe bus.
//!
//! Dispatch is synchronous and re-entrant: posting an event invokes every
//! current subscriber immediately on the calling thread, in subscription
//! order, before `post` returns. A callback may itself post further events;
//! a per-event-kind depth counter bounds that recursion so a handler that
//! re-triggers its own event cannot loop forever (the nested post is dropped
//! with a warning once the bound is hit).
//!
//! The bus is single-threaded by construction (`Rc` + `RefCell`); the frame
//! loop owns it and everything it notifies.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::warn;

/// Notifications exchanged between the chrome, the panel host, and panels.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    WindowResize { width: u32, height: u32 },
    WindowClose { should_close: bool },
    WindowMaximize { maximized: bool },
    WindowFocus { focused: bool },
    ViewOpened { name: String },
    ViewClosed { name: String },
    ThemeChanged { name: String },
    FrameBegin,
    FrameEnd,
}

/// Discriminant used for subscription filters and the re-entrancy guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    WindowResize,
    WindowClose,
    WindowMaximize,
    WindowFocus,
    ViewOpened,
    ViewClosed,
    ThemeChanged,
    FrameBegin,
    FrameEnd,
}

impl EventKind {
    const COUNT: usize = 9;

    fn index(self) -> usize {
        match self {
            EventKind::WindowResize => 0,
            EventKind::WindowClose => 1,
            EventKind::WindowMaximize => 2,
            EventKind::WindowFocus => 3,
            EventKind::ViewOpened => 4,
            EventKind::ViewClosed => 5,
            EventKind::ThemeChanged => 6,
            EventKind::FrameBegin => 7,
            EventKind::FrameEnd => 8,
        }
    }
}

impl ShellEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ShellEvent::WindowResize { .. } => EventKind::WindowResize,
            ShellEvent::WindowClose { .. } => EventKind::WindowClose,
            ShellEvent::WindowMaximize { .. } => EventKind::WindowMaximize,
            ShellEvent::WindowFocus { .. } => EventKind::WindowFocus,
            ShellEvent::ViewOpened { .. } => EventKind::ViewOpened,
            ShellEvent::ViewClosed { .. } => EventKind::ViewClosed,
            ShellEvent::ThemeChanged { .. } => EventKind::ThemeChanged,
            ShellEvent::FrameBegin => EventKind::FrameBegin,
            ShellEvent::FrameEnd => EventKind::FrameEnd,
        }
    }
}

pub type SubscriptionId = u64;

type Callback = Rc<RefCell<dyn FnMut(&ShellEvent)>>;

struct Subscriber {
    id: SubscriptionId,
    filter: Option<EventKind>,
    callback: Callback,
}

/// Maximum nesting of posts of the same event kind. Anything deeper is a
/// handler cycle and gets dropped.
const MAX_REENTRANT_DEPTH: u8 = 4;

pub struct EventBus {
    subscribers: RefCell<Vec<Subscriber>>,
    next_id: Cell<SubscriptionId>,
    depth: RefCell<[u8; EventKind::COUNT]>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            depth: RefCell::new([0; EventKind::COUNT]),
        }
    }

    /// Subscribe to a single event kind.
    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&ShellEvent) + 'static,
    {
        self.push_subscriber(Some(kind), callback)
    }

    /// Subscribe to every event posted on the bus.
    pub fn subscribe_all<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ShellEvent) + 'static,
    {
        self.push_subscriber(None, callback)
    }

    fn push_subscriber<F>(&self, filter: Option<EventKind>, callback: F) -> SubscriptionId
    where
        F: FnMut(&ShellEvent) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push(Subscriber {
            id,
            filter,
            callback: Rc::new(RefCell::new(callback)),
        });
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|s| s.id != id);
    }

    /// Post an event, invoking matching subscribers in subscription order.
    ///
    /// Fire-and-forget: there is no return value and no acknowledgment.
    pub fn post(&self, event: &ShellEvent) {
        let idx = event.kind().index();
        {
            let mut depth = self.depth.borrow_mut();
            if depth[idx] >= MAX_REENTRANT_DEPTH {
                warn!(?event, "dropping re-entrant event beyond depth bound");
                return;
            }
            depth[idx] += 1;
        }

        // Snapshot the matching callbacks so handlers may subscribe or
        // unsubscribe while dispatch is in progress.
        let snapshot: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.filter.is_none() || s.filter == Some(event.kind()))
            .map(|s| Rc::clone(&s.callback))
            .collect();

        for callback in snapshot {
            // A callback that is already running (an event posted from inside
            // its own handler) is skipped rather than re-entered.
            match callback.try_borrow_mut() {
                Ok(mut f) => f(event),
                Err(_) => warn!(?event, "skipping subscriber already in dispatch"),
            }
        }

        self.depth.borrow_mut()[idx] -= 1;
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
