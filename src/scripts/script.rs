//! # Script abstraction.
//!
//! This module defines the [`Script`] trait: a named, async, restartable body of
//! work that receives a [`Breakpoint`] and may call [`Breakpoint::wait`] to
//! suspend itself. The common handle type is [`ScriptRef`], an `Arc<dyn Script>`
//! suitable for sharing across controllers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::breakpoint::Breakpoint;
use crate::error::ScriptError;

/// # Asynchronous, step-through unit.
///
/// A `Script` has a stable [`name`](Script::name) and an async [`run`](Script::run)
/// method. Every `Controller::start` calls `run` again, so a script must be able
/// to run more than once.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use stepvisor::{Breakpoint, BreakpointInfo, Script, ScriptError};
///
/// struct Countdown(u32);
///
/// #[async_trait]
/// impl Script for Countdown {
///     fn name(&self) -> &str { "countdown" }
///
///     async fn run(&self, bp: Breakpoint) -> Result<(), ScriptError> {
///         for n in (0..self.0).rev() {
///             bp.wait(BreakpointInfo::new(1, n)).await?;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Script: Send + Sync + 'static {
    /// Returns a stable, human-readable script name.
    fn name(&self) -> &str;

    /// Runs the script to completion, suspending at each `bp.wait(..)`.
    ///
    /// Returning `Err` (or panicking) is reported through the `error` event.
    async fn run(&self, bp: Breakpoint) -> Result<(), ScriptError>;
}

/// Shared handle to a script.
pub type ScriptRef = Arc<dyn Script>;
