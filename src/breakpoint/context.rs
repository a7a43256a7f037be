//! # One-shot suspension handle and the future the script awaits.
//!
//! [`SuspensionContext::new`] returns a pair:
//! - the **context**, handed to the observer (through the `wait` event);
//! - the [`Suspension`] future, returned to the script.
//!
//! ```text
//! script ── wait(info) ──► (context, suspension)
//!                              │           │
//!        observer ◄── Event::Wait(context) │
//!           │                              ▼
//!           └── resolve(v) / reject(r) ──► suspension.await ─► Ok(v) / Err(Rejected{r})
//! ```
//!
//! ## Rules
//! - Clones of a context share one settlement slot: the first `resolve`/`reject`
//!   wins, later ones return [`SettleError::AlreadySettled`].
//! - Settling does not depend on the controller still being registered.
//! - If every clone of the context is dropped unsettled, the suspension
//!   completes with [`ScriptError::Abandoned`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use serde_json::Value;
use tokio::sync::oneshot;

use super::info::BreakpointInfo;
use crate::error::{ScriptError, SettleError};

type Settlement = Result<Value, Value>;

/// Resolve/reject handle for one suspended breakpoint.
#[derive(Clone)]
pub struct SuspensionContext {
    info: BreakpointInfo,
    slot: Arc<Mutex<Option<oneshot::Sender<Settlement>>>>,
}

impl SuspensionContext {
    /// Creates a context for `info` and the future that completes when it is settled.
    pub fn new(info: BreakpointInfo) -> (Self, Suspension) {
        let (tx, rx) = oneshot::channel();
        let ctx = Self {
            info,
            slot: Arc::new(Mutex::new(Some(tx))),
        };
        (ctx, Suspension { rx })
    }

    /// The breakpoint descriptor supplied by the script.
    #[inline]
    pub fn info(&self) -> &BreakpointInfo {
        &self.info
    }

    /// Resumes the script; `value` becomes the result of its `wait(..).await`.
    pub fn resolve(&self, value: impl Into<Value>) -> Result<(), SettleError> {
        self.settle(Ok(value.into()))
    }

    /// Resumes the script with no value (`Value::Null`).
    pub fn resume(&self) -> Result<(), SettleError> {
        self.settle(Ok(Value::Null))
    }

    /// Fails the script's `wait(..).await` with [`ScriptError::Rejected`].
    pub fn reject(&self, reason: impl Into<Value>) -> Result<(), SettleError> {
        self.settle(Err(reason.into()))
    }

    /// True once `resolve` or `reject` has been called on any clone.
    pub fn is_settled(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// True if `other` is a clone of this context.
    pub fn same_as(&self, other: &SuspensionContext) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    fn settle(&self, outcome: Settlement) -> Result<(), SettleError> {
        let tx = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(SettleError::AlreadySettled)?;
        // The script may already be gone (run dropped); settling is then a no-op.
        let _ = tx.send(outcome);
        Ok(())
    }
}

impl fmt::Debug for SuspensionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspensionContext")
            .field("info", &self.info)
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Future returned by [`Breakpoint::wait`](crate::Breakpoint::wait).
///
/// Completes when the matching [`SuspensionContext`] is settled.
#[must_use = "a breakpoint only suspends the script when awaited"]
#[derive(Debug)]
pub struct Suspension {
    rx: oneshot::Receiver<Settlement>,
}

impl Future for Suspension {
    type Output = Result<Value, ScriptError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(Ok(value))) => Poll::Ready(Ok(value)),
            Poll::Ready(Ok(Err(reason))) => Poll::Ready(Err(ScriptError::Rejected { reason })),
            Poll::Ready(Err(_closed)) => Poll::Ready(Err(ScriptError::Abandoned)),
        }
    }
}
