//! # Lifecycle events emitted by a controller.
//!
//! The [`EventKind`] enum names the five lifecycle notifications a controller
//! produces. It is the key listeners subscribe under.
//!
//! The [`Event`] enum is the closed set of notifications, each variant carrying
//! exactly the payload its listeners need:
//! - `Wait` carries the [`SuspensionContext`] the observer settles to resume the script;
//! - `Error` carries the [`ScriptError`] the run failed with.
//!
//! ## Ordering guarantees
//! For one run of one controller:
//! ```text
//! Begin ─► Wait* ─► (Error)? ─► End
//! ```
//! `Destroy` is emitted once, from `Controller::destroy`.
//!
//! ## Example
//! ```rust
//! use stepvisor::{Event, EventKind, ScriptError};
//!
//! let ev = Event::Error(ScriptError::fail("boom"));
//! assert_eq!(ev.kind(), EventKind::Error);
//! assert_eq!(ev.kind().as_str(), "error");
//! ```

use std::fmt;

use crate::breakpoint::SuspensionContext;
use crate::error::ScriptError;

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A run is about to start.
    Begin,
    /// The script reached a breakpoint and is suspended.
    Wait,
    /// The run failed.
    Error,
    /// The run finished (successfully or not); status is back to idle.
    End,
    /// The controller was destroyed.
    Destroy,
}

impl EventKind {
    /// All kinds, in lifecycle order.
    pub const ALL: [EventKind; 5] = [
        EventKind::Begin,
        EventKind::Wait,
        EventKind::Error,
        EventKind::End,
        EventKind::Destroy,
    ];

    /// Lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Begin => "begin",
            EventKind::Wait => "wait",
            EventKind::Error => "error",
            EventKind::End => "end",
            EventKind::Destroy => "destroy",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle event with its typed payload.
#[derive(Debug, Clone)]
pub enum Event {
    /// A run is about to start; status is still idle.
    Begin,
    /// Sets the pending suspension; settle it to resume the script.
    Wait(SuspensionContext),
    /// The failure value of the run.
    Error(ScriptError),
    /// The run finished; pending context cleared, status idle.
    End,
    /// The controller left its registry; last event it delivers.
    Destroy,
}

impl Event {
    /// Returns the kind this event is delivered under.
    #[inline]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Begin => EventKind::Begin,
            Event::Wait(_) => EventKind::Wait,
            Event::Error(_) => EventKind::Error,
            Event::End => EventKind::End,
            Event::Destroy => EventKind::Destroy,
        }
    }

    /// Returns the suspension context of a `Wait` event.
    #[inline]
    pub fn context(&self) -> Option<&SuspensionContext> {
        match self {
            Event::Wait(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// Returns the failure value of an `Error` event.
    #[inline]
    pub fn error(&self) -> Option<&ScriptError> {
        match self {
            Event::Error(err) => Some(err),
            _ => None,
        }
    }
}
