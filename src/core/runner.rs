//! # Run a single pass of a script.
//!
//! Drives one invocation of an [`ExecutableUnit`](crate::ExecutableUnit) to
//! completion and folds every way it can end into a `Result`:
//!
//! ```text
//! Success:  run ─► Ok(())              ─► Ok(())
//! Failure:  run ─► Err(ScriptError)    ─► Err(err)
//! Panic:    run ─► panic!(..)          ─► Err(ScriptError::Panicked { info })
//! ```
//!
//! ## Rules
//! - Never panics itself; a script panic is caught and converted.
//! - Publishes nothing: the controller turns the result into `error`/`end` events.

use std::panic::AssertUnwindSafe;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::ScriptError;
use crate::events::panic_message;

/// Awaits `run`, converting a panic into [`ScriptError::Panicked`].
pub(crate) async fn run_once(
    run: BoxFuture<'static, Result<(), ScriptError>>,
) -> Result<(), ScriptError> {
    match AssertUnwindSafe(run).catch_unwind().await {
        Ok(res) => res,
        Err(panic_err) => Err(ScriptError::Panicked {
            info: panic_message(panic_err.as_ref()),
        }),
    }
}
