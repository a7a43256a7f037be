//! Runtime core: controllers and their registry.
//!
//! This module contains the execution side of stepvisor:
//! - [`controller`]: runs one script, stores its pending breakpoint, emits lifecycle events;
//! - [`builder`]: assembles a controller (config, registry, initial listeners);
//! - [`registry`]: id → controller routing table used by breakpoints;
//! - [`runner`]: drives one run and converts panics into errors;
//! - [`config`] / [`status`]: settings and observable state.

mod builder;
mod config;
mod controller;
mod registry;
mod runner;
mod status;

pub use builder::ControllerBuilder;
pub use config::{Config, OverlapPolicy};
pub use controller::Controller;
pub use registry::{save_context, ControllerId, Registry};
pub use status::Status;
