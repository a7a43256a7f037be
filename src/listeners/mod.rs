//! # Built-in listeners
//!
//! Small, self-contained listeners useful for demos and debugging.
//!
//! - [`LogWriter`]: renders lifecycle events through `tracing` (demo/debug).

mod log;

pub use log::LogWriter;
