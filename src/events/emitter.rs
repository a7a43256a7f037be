//! # Synchronous event emitter.
//!
//! [`Emitter`] keeps an ordered list of [`Listener`]s per [`EventKind`] and
//! delivers each [`Event`] to them inline, in registration order.
//!
//! ## Architecture
//! ```text
//! Publisher (controller):            Listeners (many, per kind):
//!                                    ┌──► listener 1 (registered first)
//!   emit(&Event) ──► Emitter ────────┼──► listener 2
//!                  (snapshot list)   └──► listener N
//! ```
//!
//! ## Rules
//! - **Synchronous**: `emit()` returns after every listener has run.
//! - **Registration order**: listeners fire in the order they were added.
//! - **Duplicates**: the same listener added twice fires twice.
//! - **Identity**: `off()` matches by `Arc` pointer, removing the first match only.
//! - **Re-entrancy**: the list is snapshotted before delivery, so listeners may
//!   call `on`/`off` on the same emitter; changes apply from the next emission.
//! - **Panic isolation**: a panicking listener is logged and skipped; the
//!   remaining listeners still receive the event.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use super::event::{Event, EventKind};

/// Callback invoked with each delivered event.
pub type Listener = Arc<dyn Fn(&Event) + Send + Sync + 'static>;

/// Wraps a closure as a [`Listener`].
///
/// Keep the returned handle if you intend to [`Emitter::off`] it later.
///
/// ## Example
/// ```rust
/// use stepvisor::{listener, Emitter, Event, EventKind};
///
/// let emitter = Emitter::new();
/// let on_end = listener(|_ev: &Event| println!("done"));
/// emitter.on(EventKind::End, on_end.clone());
/// assert!(emitter.off(EventKind::End, &on_end));
/// ```
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Per-kind ordered listener lists.
#[derive(Default)]
pub struct Emitter {
    listeners: RwLock<HashMap<EventKind, Vec<Listener>>>,
}

impl Emitter {
    /// Creates an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for `kind`.
    pub fn on(&self, kind: EventKind, listener: Listener) {
        let mut map = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        map.entry(kind).or_default().push(listener);
    }

    /// Removes the first registration of `listener` for `kind`.
    ///
    /// Returns `false` (and does nothing) when it is not registered.
    pub fn off(&self, kind: EventKind, listener: &Listener) -> bool {
        let mut map = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let Some(list) = map.get_mut(&kind) else {
            return false;
        };
        let Some(pos) = list.iter().position(|l| Arc::ptr_eq(l, listener)) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            map.remove(&kind);
        }
        true
    }

    /// Removes every registration for `kind`.
    pub fn off_all(&self, kind: EventKind) {
        let mut map = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(&kind);
    }

    /// Delivers `event` to the listeners of its kind, in registration order.
    pub fn emit(&self, event: &Event) {
        let snapshot: Vec<Listener> = {
            let map = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
            match map.get(&event.kind()) {
                Some(list) => list.clone(),
                None => return,
            }
        };

        for l in snapshot {
            if let Err(panic_err) = panic::catch_unwind(AssertUnwindSafe(|| l(event))) {
                tracing::error!(
                    event = %event.kind(),
                    info = %panic_message(panic_err.as_ref()),
                    "listener panicked"
                );
            }
        }
    }

    /// Number of listeners registered for `kind`.
    #[must_use]
    pub fn len(&self, kind: EventKind) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// True if no listener is registered for any kind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

/// Renders a panic payload as text.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
