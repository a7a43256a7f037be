//! # Function-backed script (`ScriptFn`)
//!
//! [`ScriptFn`] wraps a closure `F: Fn(Breakpoint) -> Fut`, producing a fresh
//! future per run. Nothing is shared between runs unless the closure captures
//! it explicitly (e.g. an `Arc<Mutex<..>>` holding the data being visualized).
//!
//! ## Example
//! ```rust
//! use stepvisor::{Breakpoint, BreakpointInfo, ScriptError, ScriptFn, ScriptRef};
//!
//! let s: ScriptRef = ScriptFn::arc("linear-search", |bp: Breakpoint| async move {
//!     bp.wait(BreakpointInfo::new(1, 0)).await?;
//!     Ok::<_, ScriptError>(())
//! });
//!
//! assert_eq!(s.name(), "linear-search");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::breakpoint::Breakpoint;
use crate::error::ScriptError;
use crate::scripts::script::Script;

/// Function-backed script implementation.
///
/// Wraps a closure that *creates* a new future per run.
#[derive(Debug)]
pub struct ScriptFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ScriptFn<F> {
    /// Creates a new function-backed script.
    ///
    /// Prefer [`ScriptFn::arc`] when you immediately need a [`ScriptRef`](crate::ScriptRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the script and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Script for ScriptFn<F>
where
    F: Fn(Breakpoint) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ScriptError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, bp: Breakpoint) -> Result<(), ScriptError> {
        (self.f)(bp).await
    }
}
