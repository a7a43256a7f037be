//! # Controller registry - id-addressed routing table for breakpoints.
//!
//! A running script only holds a [`Breakpoint`](crate::Breakpoint), which knows
//! a [`ControllerId`] and a registry. When the script calls `wait`, the registry
//! resolves the id to the live controller and hands it the suspension context.
//!
//! ## Architecture
//! ```text
//! Controller::build ──► Registry::register(shared)      (id → Weak<controller>)
//! Breakpoint::wait  ──► Registry::save_context(id, ctx)
//!                         ├─► lookup(id) = Some(c) → c.save_code_context(ctx)
//!                         └─► lookup(id) = None    → warn + ctx.reject(DELETED_MESSAGE)
//! Controller::destroy ─► Registry::deregister(id)
//! ```
//!
//! ## Rules
//! - Ids come from one process-wide monotonic counter shared by every registry,
//!   so an id is never reused, even across registries.
//! - The registry holds weak references: a controller whose handles were all
//!   dropped is treated like a destroyed one.
//! - A miss is not an error at this level; [`Registry::save_context`] rejects
//!   the single suspension and leaves every other controller untouched.
//! - Locks are released before any controller code (and so any listener) runs.
//!
//! ## Global registry
//! [`Registry::global`] is the process-wide registry used by
//! [`Controller::new`](crate::Controller::new). It is the intentional, well-known
//! registration point through which code with no reference to a controller can
//! still reach it by id (see [`save_context`](crate::save_context)).

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, Weak};

use super::controller::{Controller, Shared};
use crate::breakpoint::SuspensionContext;
use crate::error::DELETED_MESSAGE;

/// Global id counter; shared by all registries.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide registry.
static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

/// Identifier of a controller, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControllerId(u64);

impl ControllerId {
    /// Allocates the next id.
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Raw numeric value.
    #[inline]
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Id-addressed table of live controllers.
#[derive(Default)]
pub struct Registry {
    slots: RwLock<HashMap<ControllerId, Weak<Shared>>>,
}

impl Registry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns the process-wide registry.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(Registry::new))
    }

    /// Adds a controller under its id and returns that id.
    ///
    /// Slots whose controller has been dropped are pruned on the way.
    pub(crate) fn register(&self, shared: &Arc<Shared>) -> ControllerId {
        let id = shared.id;
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.retain(|_, weak| weak.strong_count() > 0);
        slots.insert(id, Arc::downgrade(shared));
        id
    }

    /// Returns the live controller registered under `id`, if any.
    pub fn lookup(&self, id: ControllerId) -> Option<Controller> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(&id)
            .and_then(Weak::upgrade)
            .map(Controller::from_shared)
    }

    /// Vacates the slot for `id`. Idempotent.
    ///
    /// Returns `true` if a slot was removed.
    pub fn deregister(&self, id: ControllerId) -> bool {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.remove(&id).is_some()
    }

    /// Routes a suspension context to the controller registered under `id`.
    ///
    /// If no live controller is found, logs a warning and rejects the context
    /// with [`DELETED_MESSAGE`]. Never panics.
    pub fn save_context(&self, id: ControllerId, context: SuspensionContext) {
        match self.lookup(id) {
            Some(controller) => controller.save_code_context(context),
            None => {
                tracing::warn!(
                    controller = %id,
                    line = context.info().line,
                    "controller not found, rejecting breakpoint"
                );
                let _ = context.reject(DELETED_MESSAGE);
            }
        }
    }

    /// Returns the sorted list of live controller ids.
    pub fn ids(&self) -> Vec<ControllerId> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<ControllerId> = slots
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Number of live controllers.
    pub fn len(&self) -> usize {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|weak| weak.strong_count() > 0).count()
    }

    /// True if no live controller is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("ids", &self.ids()).finish()
    }
}

/// Routes a suspension context through the [global registry](Registry::global).
pub fn save_context(id: ControllerId, context: SuspensionContext) {
    Registry::global().save_context(id, context);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::{Breakpoint, BreakpointInfo};
    use crate::error::ScriptError;
    use crate::scripts::{ScriptFn, ScriptRef};
    use serde_json::json;

    fn noop() -> ScriptRef {
        ScriptFn::arc("noop", |_bp: Breakpoint| async { Ok::<_, ScriptError>(()) })
    }

    #[test]
    fn test_ids_strictly_increase() {
        let a = ControllerId::next();
        let b = ControllerId::next();
        let c = ControllerId::next();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_register_lookup_deregister() {
        let reg = Registry::new();
        let ctrl = Controller::builder(noop()).with_registry(reg.clone()).build();
        let id = ctrl.id();

        assert_eq!(reg.lookup(id).map(|c| c.id()), Some(id));
        assert_eq!(reg.ids(), vec![id]);

        assert!(reg.deregister(id));
        assert!(!reg.deregister(id));
        assert!(reg.lookup(id).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_dropped_controller_is_not_live() {
        let reg = Registry::new();
        let id = Controller::builder(noop()).with_registry(reg.clone()).build().id();
        assert!(reg.lookup(id).is_none());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn test_len_counts_only_live_controllers() {
        let reg = Registry::new();
        let kept: Vec<Controller> = (0..3)
            .map(|_| Controller::builder(noop()).with_registry(reg.clone()).build())
            .collect();
        drop(Controller::builder(noop()).with_registry(reg.clone()).build());

        assert_eq!(reg.len(), 3);
        assert_eq!(reg.len(), reg.ids().len());

        reg.deregister(kept[0].id());
        assert_eq!(reg.len(), 2);
        assert!(!reg.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_id_rejects_with_deleted_message() {
        let reg = Registry::new();
        let (ctx, suspension) = SuspensionContext::new(BreakpointInfo::new(1, 0));

        reg.save_context(ControllerId::next(), ctx.clone());

        assert!(ctx.is_settled());
        assert_eq!(
            suspension.await,
            Err(ScriptError::Rejected { reason: json!(DELETED_MESSAGE) })
        );
    }

    #[test]
    fn test_registries_are_isolated() {
        let a = Registry::new();
        let b = Registry::new();
        let ctrl = Controller::builder(noop()).with_registry(a.clone()).build();
        assert!(a.lookup(ctrl.id()).is_some());
        assert!(b.lookup(ctrl.id()).is_none());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&Registry::global(), &Registry::global()));
        let ctrl = Controller::new(noop());
        assert!(Registry::global().lookup(ctrl.id()).is_some());
        ctrl.destroy();
        assert!(Registry::global().lookup(ctrl.id()).is_none());
    }
}
