//! Error types used by the stepvisor controller and scripts.
//!
//! This module defines two main error enums:
//!
//! - [`ScriptError`]: the failure value of a script run (reported through `Event::Error`).
//! - [`SettleError`]: misuse of a suspension context (settling twice, nothing to settle).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging.

use std::fmt::Display;

use serde_json::Value;
use thiserror::Error;

/// Reason used to reject a breakpoint routed to a destroyed or unknown controller.
pub const DELETED_MESSAGE: &str = "The entity has been deleted.";

/// Reason used to reject a breakpoint raised while another one is still pending.
pub const OVERLAP_MESSAGE: &str = "A breakpoint is already pending.";

/// # Errors produced by script execution.
///
/// A script returns one of these (usually by `?` on a rejected
/// [`Suspension`](crate::Suspension)); the controller catches it and delivers it
/// to `error` listeners. It is never returned from [`Controller::start`](crate::Controller::start).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// A breakpoint was settled with `reject`.
    #[error("breakpoint rejected: {reason}")]
    Rejected {
        /// The value passed to `reject`.
        reason: Value,
    },

    /// Every handle to a pending breakpoint was dropped without settling it.
    #[error("breakpoint abandoned before it was settled")]
    Abandoned,

    /// The script failed on its own.
    #[error("script failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The script panicked while running.
    #[error("script panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl ScriptError {
    /// Shorthand for [`ScriptError::Fail`] from anything printable.
    ///
    /// # Example
    /// ```
    /// use stepvisor::ScriptError;
    ///
    /// let err = ScriptError::fail("index out of range");
    /// assert_eq!(err.to_string(), "script failed: index out of range");
    /// ```
    pub fn fail(error: impl Display) -> Self {
        ScriptError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ScriptError::Rejected { .. } => "script_rejected",
            ScriptError::Abandoned => "script_abandoned",
            ScriptError::Fail { .. } => "script_failed",
            ScriptError::Panicked { .. } => "script_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ScriptError::Rejected { reason } => match reason.as_str() {
                Some(text) => format!("rejected: {text}"),
                None => format!("rejected: {reason}"),
            },
            ScriptError::Abandoned => "abandoned".to_string(),
            ScriptError::Fail { error } => format!("error: {error}"),
            ScriptError::Panicked { info } => format!("panic: {info}"),
        }
    }

    /// Returns the rejection reason, if this error came from `reject`.
    pub fn rejection(&self) -> Option<&Value> {
        match self {
            ScriptError::Rejected { reason } => Some(reason),
            _ => None,
        }
    }
}

/// # Errors produced when settling a suspension.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleError {
    /// The controller has no unsettled breakpoint.
    #[error("no breakpoint is pending")]
    NothingPending,

    /// `resolve` or `reject` was already called on this context.
    #[error("breakpoint already settled")]
    AlreadySettled,
}

impl SettleError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use stepvisor::SettleError;
    ///
    /// assert_eq!(SettleError::AlreadySettled.as_label(), "settle_already_settled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SettleError::NothingPending => "settle_nothing_pending",
            SettleError::AlreadySettled => "settle_already_settled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SettleError::NothingPending => {
                "nothing to settle: no breakpoint is pending".to_string()
            }
            SettleError::AlreadySettled => "breakpoint already resolved or rejected".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejected_message_unquotes_strings() {
        let err = ScriptError::Rejected {
            reason: json!(DELETED_MESSAGE),
        };
        assert_eq!(err.as_message(), "rejected: The entity has been deleted.");
        assert_eq!(err.rejection(), Some(&json!(DELETED_MESSAGE)));
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(ScriptError::Abandoned.as_label(), "script_abandoned");
        assert_eq!(ScriptError::fail("x").as_label(), "script_failed");
        assert_eq!(
            ScriptError::Panicked { info: "boom".into() }.as_label(),
            "script_panicked"
        );
        assert_eq!(SettleError::NothingPending.as_label(), "settle_nothing_pending");
    }

    #[test]
    fn test_rejection_is_none_for_other_kinds() {
        assert!(ScriptError::fail("x").rejection().is_none());
        assert!(ScriptError::Abandoned.rejection().is_none());
    }

    #[test]
    fn test_settle_messages() {
        assert_eq!(
            SettleError::NothingPending.as_message(),
            "nothing to settle: no breakpoint is pending"
        );
        assert_eq!(
            SettleError::AlreadySettled.as_message(),
            "breakpoint already resolved or rejected"
        );
    }
}
