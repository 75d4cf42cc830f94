//! Event bus for decoupled cross-component communication.
//!
//! Independently-constructed components (the search coordinator and the
//! project collection store) agree on shared state by broadcasting typed
//! signals instead of holding references to each other. Delivery is
//! synchronous and in registration order per signal kind; a panicking
//! handler is isolated so later handlers still run; publishing with no
//! subscribers is a silent no-op (fire-and-forget, no buffering or replay).
//!
//! The bus is an explicit, injectable value constructed once per
//! application lifetime and handed to components by the composition root.
//! It is never a process-global.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::error;

/// A broadcast signal with its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The authoritative project list changed; interested views re-fetch
    ProjectsChanged,
    /// The global search query changed; empty string means "clear filter"
    SearchQueryChanged(String),
    /// A project was chosen from the suggestion list
    ProjectSelected(String),
}

/// Subscription key: the signal variant without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    ProjectsChanged,
    SearchQueryChanged,
    ProjectSelected,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::ProjectsChanged => SignalKind::ProjectsChanged,
            Signal::SearchQueryChanged(_) => SignalKind::SearchQueryChanged,
            Signal::ProjectSelected(_) => SignalKind::ProjectSelected,
        }
    }
}

type Handler = Arc<dyn Fn(&Signal) + Send + Sync>;

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    registry: Mutex<HashMap<SignalKind, Vec<(u64, Handler)>>>,
}

/// Cheaply-cloneable handle to a shared signal registry
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one signal kind.
    ///
    /// Handlers fire in registration order. The returned [`Subscription`]
    /// deregisters the handler when dropped or explicitly unsubscribed.
    pub fn subscribe<F>(&self, kind: SignalKind, handler: F) -> Subscription
    where
        F: Fn(&Signal) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .registry
            .lock()
            .expect("event bus registry poisoned")
            .entry(kind)
            .or_default()
            .push((id, Arc::new(handler)));
        Subscription { bus: Arc::downgrade(&self.inner), kind, id: Some(id) }
    }

    /// Deliver a signal to every handler currently registered for its kind.
    ///
    /// Delivery is synchronous: all handlers have run by the time this
    /// returns. Handlers registered during delivery are not invoked for the
    /// in-flight signal. A panicking handler is caught and logged; delivery
    /// continues with the next handler.
    pub fn publish(&self, signal: Signal) {
        let handlers: Vec<Handler> = {
            let registry = self.inner.registry.lock().expect("event bus registry poisoned");
            match registry.get(&signal.kind()) {
                Some(entries) => entries.iter().map(|(_, h)| Arc::clone(h)).collect(),
                None => return, // no subscribers: silent no-op
            }
        };

        for handler in handlers {
            if panic::catch_unwind(AssertUnwindSafe(|| handler(&signal))).is_err() {
                error!(kind = ?signal.kind(), "signal handler panicked; continuing delivery");
            }
        }
    }

    #[cfg(test)]
    fn handler_count(&self, kind: SignalKind) -> usize {
        self.inner
            .registry
            .lock()
            .expect("event bus registry poisoned")
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

/// Capability to deregister one handler.
///
/// Unsubscribes on drop; calling [`Subscription::unsubscribe`] twice is a
/// no-op, not an error.
pub struct Subscription {
    bus: Weak<BusInner>,
    kind: SignalKind,
    id: Option<u64>,
}

impl Subscription {
    pub fn unsubscribe(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(inner) = self.bus.upgrade()
            && let Some(handlers) =
                inner.registry.lock().expect("event bus registry poisoned").get_mut(&self.kind)
        {
            handlers.retain(|(handler_id, _)| *handler_id != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
