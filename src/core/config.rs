//! # Controller configuration.
//!
//! Provides [`Config`], the settings a [`Controller`](crate::Controller) is built with,
//! and [`OverlapPolicy`], which decides what happens when a script raises a second
//! breakpoint while the first one is still unsettled.
//!
//! Config is passed through the builder:
//! `Controller::builder(script).with_config(cfg).build()`.

use std::fmt;

/// What to do with a breakpoint raised while another one is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Reject the new breakpoint immediately; the pending one stays in place.
    #[default]
    Reject,
    /// Replace the stored pending context with the new one and emit `wait` again.
    ///
    /// The replaced context is not settled; whoever received it may still settle it.
    Replace,
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapPolicy::Reject => f.write_str("reject"),
            OverlapPolicy::Replace => f.write_str("replace"),
        }
    }
}

/// Configuration for a single controller.
///
/// ## Field semantics
/// - `overlap`: handling of a second breakpoint while one is pending
/// - `log_script_errors`: emit a `tracing::warn!` for every failed run, in
///   addition to the `error` event
#[derive(Clone, Debug)]
pub struct Config {
    /// Policy for overlapping breakpoints.
    pub overlap: OverlapPolicy,

    /// Log failed runs at `warn` level.
    pub log_script_errors: bool,
}

impl Config {
    /// True if a second breakpoint should replace the pending one.
    #[inline]
    pub fn replaces_pending(&self) -> bool {
        matches!(self.overlap, OverlapPolicy::Replace)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `overlap = OverlapPolicy::Reject`
    /// - `log_script_errors = true`
    fn default() -> Self {
        Self {
            overlap: OverlapPolicy::default(),
            log_script_errors: true,
        }
    }
}
