//! # Controller: runs one script and broadcasts its lifecycle.
//!
//! A [`Controller`] owns one [`ExecutableUnit`] (a script with its breakpoint
//! capability injected), a status, the currently pending
//! [`SuspensionContext`] and an [`Emitter`] of lifecycle events.
//!
//! ## Lifecycle
//! ```text
//! build()   ──► inject(script, id, registry) ──► Registry::register
//!
//! start()   ──► emit Begin ──► status = Running ──► spawn runner::run_once
//!                                                   │
//!    bp.wait(info) ──► Registry ──► save_code_context(ctx)
//!                                     ├─► pending = ctx
//!                                     └─► emit Wait(ctx)
//!    observer ──► ctx.resolve(..) / ctx.reject(..) ──► script continues
//!                                                   │
//!                     Ok  ──────────────────────────┤
//!                     Err ──► status = Error ──► emit Error(err)
//!                                                   ▼
//!                           pending = None, status = Idle, emit End
//!
//! destroy() ──► Registry::deregister ──► off_all(End, Begin, Wait, Error)
//!           ──► emit Destroy ──► off_all(Destroy)
//! ```
//!
//! ## Rules
//! - `Error` status is transient; after `End` the status is always `Idle`.
//! - `start()` is not guarded against overlapping runs; starting again while
//!   running is the caller's responsibility.
//! - `destroy()` does not settle a pending context. A script paused at that
//!   moment stays suspended until a retained context is settled; the
//!   controller keeps its own clone as pending, so with nobody else holding one
//!   the run never ends.
//! - `ScriptError::Abandoned` only reaches a script when the controller itself
//!   drops its clone while no one else holds one: an `OverlapPolicy::Replace`
//!   overwrite, or an overlapping `start()` clearing the pending slot.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::task::JoinHandle;

use super::builder::ControllerBuilder;
use super::config::Config;
use super::registry::{ControllerId, Registry};
use super::runner;
use super::status::Status;
use crate::breakpoint::{ExecutableUnit, SuspensionContext};
use crate::error::{ScriptError, SettleError, OVERLAP_MESSAGE};
use crate::events::{Emitter, Event, EventKind, Listener};
use crate::scripts::ScriptRef;

/// Mutable run state.
#[derive(Default)]
struct State {
    status: Status,
    pending: Option<SuspensionContext>,
}

/// State shared by every handle to one controller (and weakly by the registry).
pub(crate) struct Shared {
    pub(crate) id: ControllerId,
    unit: ExecutableUnit,
    registry: Arc<Registry>,
    config: Config,
    state: Mutex<State>,
    emitter: Emitter,
}

impl Shared {
    pub(crate) fn new(
        id: ControllerId,
        unit: ExecutableUnit,
        registry: Arc<Registry>,
        config: Config,
    ) -> Self {
        Self {
            id,
            unit,
            registry,
            config,
            state: Mutex::new(State::default()),
            emitter: Emitter::new(),
        }
    }
}

/// Step-through execution controller.
///
/// Cheap to clone; clones are handles to the same controller.
///
/// ## Example
/// ```rust
/// use stepvisor::{listener, Breakpoint, BreakpointInfo, Controller, Event, EventKind, ScriptError, ScriptFn};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let script = ScriptFn::arc("demo", |bp: Breakpoint| async move {
///     let n = bp.wait(BreakpointInfo::new(1, 0)).await?;
///     assert_eq!(n, 7);
///     Ok::<_, ScriptError>(())
/// });
///
/// let ctrl = Controller::new(script);
/// ctrl.on(EventKind::Wait, listener(|ev: &Event| {
///     if let Some(ctx) = ev.context() {
///         ctx.resolve(7).unwrap();
///     }
/// }));
///
/// ctrl.start().await.unwrap();
/// assert_eq!(ctrl.status(), stepvisor::Status::Idle);
/// ctrl.destroy();
/// # }
/// ```
#[derive(Clone)]
pub struct Controller {
    shared: Arc<Shared>,
}

impl Controller {
    /// Creates a controller with the default [`Config`], registered in the
    /// [global registry](Registry::global).
    pub fn new(script: ScriptRef) -> Self {
        Self::builder(script).build()
    }

    /// Returns a builder for a controller running `script`.
    pub fn builder(script: ScriptRef) -> ControllerBuilder {
        ControllerBuilder::new(script)
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Identifier assigned at construction.
    #[inline]
    pub fn id(&self) -> ControllerId {
        self.shared.id
    }

    /// Name of the script being run.
    #[inline]
    pub fn name(&self) -> &str {
        self.shared.unit.name()
    }

    /// Configuration this controller was built with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.state().status
    }

    /// The pending suspension context, if one is stored and not yet settled.
    pub fn pending_context(&self) -> Option<SuspensionContext> {
        self.state()
            .pending
            .as_ref()
            .filter(|ctx| !ctx.is_settled())
            .cloned()
    }

    /// True while this controller is reachable through its registry.
    pub fn is_registered(&self) -> bool {
        self.shared.registry.lookup(self.id()).is_some()
    }

    // ---- Event surface ----

    /// Registers `listener` for `kind`.
    pub fn on(&self, kind: EventKind, listener: Listener) {
        self.shared.emitter.on(kind, listener);
    }

    /// Removes the first registration of `listener` for `kind`.
    pub fn off(&self, kind: EventKind, listener: &Listener) -> bool {
        self.shared.emitter.off(kind, listener)
    }

    /// Removes every listener for `kind`.
    pub fn off_all(&self, kind: EventKind) {
        self.shared.emitter.off_all(kind);
    }

    /// Delivers `event` to this controller's listeners.
    pub fn emit(&self, event: &Event) {
        self.shared.emitter.emit(event);
    }

    // ---- Execution ----

    /// Starts a run of the script.
    ///
    /// Emits `begin` before returning, then runs the script on the Tokio
    /// runtime. Failures are reported through the `error` event; the returned
    /// handle completes after `end` has been emitted.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn start(&self) -> JoinHandle<()> {
        tracing::debug!(controller = %self.id(), script = self.name(), "run starting");
        self.emit(&Event::Begin);
        self.set_status(Status::Running);

        let me = self.clone();
        let run = self.shared.unit.invoke();
        tokio::spawn(async move {
            match runner::run_once(run).await {
                Ok(()) => {}
                Err(err) => me.fail(err),
            }
            me.finish();
        })
    }

    /// Stores `context` as pending and emits `wait` with it.
    ///
    /// Called by breakpoint routing; the controller never settles the context
    /// on its own.
    pub(crate) fn save_code_context(&self, context: SuspensionContext) {
        {
            let mut state = self.state();
            let overlapping = state.pending.as_ref().is_some_and(|p| !p.is_settled());
            if overlapping && !self.shared.config.replaces_pending() {
                drop(state);
                tracing::warn!(
                    controller = %self.id(),
                    line = context.info().line,
                    "breakpoint already pending, rejecting new one"
                );
                let _ = context.reject(OVERLAP_MESSAGE);
                return;
            }
            state.pending = Some(context.clone());
        }
        tracing::debug!(controller = %self.id(), info = %context.info(), "suspended");
        self.emit(&Event::Wait(context));
    }

    /// Resolves the pending breakpoint with `value`.
    pub fn resolve(&self, value: impl Into<Value>) -> Result<(), SettleError> {
        self.pending_context()
            .ok_or(SettleError::NothingPending)?
            .resolve(value)
    }

    /// Rejects the pending breakpoint with `reason`.
    pub fn reject(&self, reason: impl Into<Value>) -> Result<(), SettleError> {
        self.pending_context()
            .ok_or(SettleError::NothingPending)?
            .reject(reason)
    }

    /// Removes this controller from its registry and releases its listeners.
    ///
    /// A pending breakpoint is left untouched: the run stays suspended until
    /// that context is settled, which is still possible through
    /// [`pending_context`](Self::pending_context) or a retained clone.
    pub fn destroy(&self) {
        self.shared.registry.deregister(self.id());
        for kind in [EventKind::End, EventKind::Begin, EventKind::Wait, EventKind::Error] {
            self.off_all(kind);
        }
        self.emit(&Event::Destroy);
        self.off_all(EventKind::Destroy);
        tracing::debug!(controller = %self.id(), "destroyed");
    }

    // ---- Helpers ----

    fn state(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn set_status(&self, status: Status) {
        self.state().status = status;
    }

    /// Failure path: transient `Error` status, optional log, `error` event.
    fn fail(&self, err: ScriptError) {
        self.set_status(Status::Error);
        if self.shared.config.log_script_errors {
            tracing::warn!(
                controller = %self.id(),
                script = self.name(),
                label = err.as_label(),
                "run failed: {}",
                err.as_message()
            );
        }
        self.emit(&Event::Error(err));
    }

    /// Always runs after a run: clear pending, back to `Idle`, `end` event.
    fn finish(&self) {
        {
            let mut state = self.state();
            state.pending = None;
            state.status = Status::Idle;
        }
        tracing::debug!(controller = %self.id(), "run ended");
        self.emit(&Event::End);
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("id", &self.id())
            .field("script", &self.name())
            .field("status", &self.status())
            .finish()
    }
}
