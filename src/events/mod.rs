//! Lifecycle events: types and emitter.
//!
//! This module groups the event **data model** and the **emitter** every
//! controller uses to notify its listeners.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and typed payloads
//! - [`Emitter`], [`Listener`] synchronous, ordered publish/subscribe
//!
//! ## Quick reference
//! - **Publisher**: `Controller` (`start`, breakpoint routing, `destroy`).
//! - **Consumers**: user listeners registered with `Controller::on`, and the
//!   optional `LogWriter`.

mod emitter;
mod event;

pub use emitter::{listener, Emitter, Listener};
pub(crate) use emitter::panic_message;
pub use event::{Event, EventKind};
