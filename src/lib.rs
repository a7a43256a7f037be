//! # stepvisor
//!
//! **Stepvisor** is a single-step execution controller for async Rust.
//!
//! A script is ordinary async code that receives a [`Breakpoint`]. Each call to
//! [`Breakpoint::wait`] suspends the script and hands a one-shot
//! [`SuspensionContext`] to whoever listens on the controller. The script resumes
//! only when that observer calls `resolve` or `reject`. The crate is meant as
//! the engine of step-through tools such as algorithm visualizers: the
//! algorithm runs unmodified except at its explicit breakpoints.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐
//!     │    Script    │   │    Script    │        (ScriptFn / impl Script)
//!     └──────┬───────┘   └──────┬───────┘
//!            ▼ inject           ▼ inject          (Breakpoint { id, registry })
//!     ┌──────────────┐   ┌──────────────┐
//!     │ Controller 0 │   │ Controller 1 │ ──► Emitter ──► listeners
//!     └──────┬───────┘   └──────┬───────┘     (begin / wait / error / end / destroy)
//!            │ register         │ register
//!            ▼                  ▼
//! ┌───────────────────────────────────────────────┐
//! │  Registry (id → controller, weak)             │ ◄── bp.wait(info)
//! │  - Registry::global(): process-wide default   │     routes by id
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Controller::start()
//!   ├─► emit Begin, status = Running
//!   ├─► spawn script.run(bp)
//!   │       │
//!   │       ├─ bp.wait(info) ─► Registry ─► emit Wait(ctx) ─► observer settles ctx
//!   │       │
//!   │       ├─ Ok(())  ───────────────────────────────┐
//!   │       └─ Err / panic ─► status = Error,         │
//!   │                         emit Error(err) ────────┤
//!   │                                                 ▼
//!   └────────────────────────────── status = Idle, emit End
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                         |
//! |-------------------|-----------------------------------------------------------------|--------------------------------------------|
//! | **Scripts**       | Define scripts as closures or trait impls, restartable.         | [`Script`], [`ScriptFn`], [`ScriptRef`]    |
//! | **Breakpoints**   | Suspend a script until an observer settles it.                  | [`Breakpoint`], [`SuspensionContext`]      |
//! | **Control**       | Start runs, inspect status, settle or destroy.                  | [`Controller`], [`ControllerBuilder`]      |
//! | **Events**        | Typed, synchronous lifecycle notifications.                     | [`Event`], [`EventKind`], [`Emitter`]      |
//! | **Routing**       | Id-addressed table of live controllers.                         | [`Registry`], [`save_context`]             |
//! | **Errors**        | Typed script and settle errors.                                 | [`ScriptError`], [`SettleError`]           |
//! | **Configuration** | Overlapping-breakpoint policy, error logging.                   | [`Config`], [`OverlapPolicy`]              |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] listener _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use stepvisor::{listener, Breakpoint, BreakpointInfo, Controller, Event, EventKind, ScriptError, ScriptFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let script = ScriptFn::arc("two-steps", |bp: Breakpoint| async move {
//!         bp.wait(BreakpointInfo::new(1, 0)).await?;
//!         bp.wait(BreakpointInfo::new(2, 0)).await?;
//!         Ok::<_, ScriptError>(())
//!     });
//!
//!     let ctrl = Controller::new(script);
//!
//!     // Auto-step: resume every breakpoint as soon as it is reached.
//!     ctrl.on(EventKind::Wait, listener(|ev: &Event| {
//!         if let Some(ctx) = ev.context() {
//!             println!("paused at {}", ctx.info());
//!             let _ = ctx.resume();
//!         }
//!     }));
//!
//!     ctrl.start().await.unwrap();
//!     ctrl.destroy();
//! }
//! ```
mod breakpoint;
mod core;
mod error;
mod events;
mod scripts;

// ---- Public re-exports ----

pub use breakpoint::{
    inject, Breakpoint, BreakpointInfo, ExecutableUnit, Suspension, SuspensionContext,
};
pub use core::{
    save_context, Config, Controller, ControllerBuilder, ControllerId, OverlapPolicy, Registry,
    Status,
};
pub use error::{ScriptError, SettleError, DELETED_MESSAGE, OVERLAP_MESSAGE};
pub use events::{listener, Emitter, Event, EventKind, Listener};
pub use scripts::{Script, ScriptFn, ScriptRef};

// Optional: expose a simple built-in logger listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod listeners;
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
