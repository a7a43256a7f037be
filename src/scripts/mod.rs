//! # Script abstractions.
//!
//! This module provides the script-related types:
//! - [`Script`] - trait for implementing async, step-through scripts
//! - [`ScriptFn`] - function-based script implementation
//! - [`ScriptRef`] - shared reference to a script (`Arc<dyn Script>`)

mod script;
mod script_fn;

pub use script::{Script, ScriptRef};
pub use script_fn::ScriptFn;
