//! # Breakpoints: descriptors, suspension handles, and injection.
//!
//! This module provides the pieces a script uses to suspend itself:
//! - [`BreakpointInfo`] - opaque `{ line, description }` payload
//! - [`SuspensionContext`] - one-shot resolve/reject handle for the observer
//! - [`Suspension`] - the future the script awaits
//! - [`Breakpoint`] - the injected `wait` capability
//! - [`ExecutableUnit`] - a script with its capability injected

mod context;
mod info;
mod inject;

pub use context::{Suspension, SuspensionContext};
pub use info::BreakpointInfo;
pub use inject::{inject, Breakpoint, ExecutableUnit};
