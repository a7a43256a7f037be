//! # Breakpoint injection.
//!
//! A script never holds its controller. Instead, [`inject`] pairs the script
//! with a [`Breakpoint`] capability that only knows the controller's id and the
//! registry it lives in. The result is the [`ExecutableUnit`] the controller runs.
//!
//! ## Routing
//! ```text
//! script ── bp.wait(info) ──► SuspensionContext::new(info)
//!                                   │
//!                                   ▼
//!                      registry.save_context(id, ctx)
//!                        ├─ found  ─► controller.save_code_context(ctx) ─► Event::Wait
//!                        └─ absent ─► warn + ctx.reject("The entity has been deleted.")
//!                                   │
//! script ◄──────── Suspension ──────┘  (completes when ctx is settled)
//! ```
//!
//! Routing happens when `wait` is **called**, not when the returned future is
//! first polled, so the observer sees the breakpoint even before the script
//! awaits it.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::context::{Suspension, SuspensionContext};
use super::info::BreakpointInfo;
use crate::core::{ControllerId, Registry};
use crate::error::ScriptError;
use crate::scripts::ScriptRef;

/// The `wait` capability handed to a running script.
///
/// Cheap to clone; clones route to the same controller.
#[derive(Clone)]
pub struct Breakpoint {
    id: ControllerId,
    registry: Arc<Registry>,
}

impl Breakpoint {
    pub(crate) fn new(id: ControllerId, registry: Arc<Registry>) -> Self {
        Self { id, registry }
    }

    /// Id of the controller this breakpoint routes to.
    #[inline]
    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// Suspends the script until the observer settles the breakpoint.
    ///
    /// Resolves to the value passed to `resolve`, or fails with
    /// [`ScriptError::Rejected`] so the script can propagate it with `?`.
    ///
    /// ## Example
    /// ```rust,no_run
    /// use stepvisor::{Breakpoint, BreakpointInfo, ScriptError};
    ///
    /// async fn bubble_pass(bp: Breakpoint) -> Result<(), ScriptError> {
    ///     bp.wait(BreakpointInfo::new(1, 0)).await?;
    ///     // compare, swap...
    ///     bp.wait(BreakpointInfo::new(2, 1)).await?;
    ///     Ok(())
    /// }
    /// ```
    pub fn wait(&self, info: BreakpointInfo) -> Suspension {
        let (ctx, suspension) = SuspensionContext::new(info);
        self.registry.save_context(self.id, ctx);
        suspension
    }
}

impl fmt::Debug for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Breakpoint").field("id", &self.id).finish()
    }
}

/// A script with its breakpoint capability injected; what `start()` runs.
#[derive(Clone)]
pub struct ExecutableUnit {
    script: ScriptRef,
    breakpoint: Breakpoint,
}

impl ExecutableUnit {
    /// Name of the underlying script.
    #[inline]
    pub fn name(&self) -> &str {
        self.script.name()
    }

    /// Creates a fresh run of the script.
    pub fn invoke(&self) -> BoxFuture<'static, Result<(), ScriptError>> {
        let script = Arc::clone(&self.script);
        let bp = self.breakpoint.clone();
        Box::pin(async move { script.run(bp).await })
    }
}

/// Injects a breakpoint capability for controller `id` into `script`.
pub fn inject(script: ScriptRef, id: ControllerId, registry: Arc<Registry>) -> ExecutableUnit {
    ExecutableUnit {
        script,
        breakpoint: Breakpoint::new(id, registry),
    }
}
