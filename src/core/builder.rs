use std::sync::Arc;

use super::config::Config;
use super::controller::{Controller, Shared};
use super::registry::{ControllerId, Registry};
use crate::breakpoint::inject;
use crate::events::{EventKind, Listener};
use crate::scripts::ScriptRef;

/// Builder for constructing a [`Controller`] with optional settings.
pub struct ControllerBuilder {
    script: ScriptRef,
    cfg: Config,
    registry: Option<Arc<Registry>>,
    listeners: Vec<(EventKind, Listener)>,
}

impl ControllerBuilder {
    /// Creates a new builder for `script` with the default configuration.
    pub fn new(script: ScriptRef) -> Self {
        Self {
            script,
            cfg: Config::default(),
            registry: None,
            listeners: Vec::new(),
        }
    }

    /// Sets the controller configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Registers the controller in `registry` instead of the global one.
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Adds a listener before the controller becomes reachable.
    pub fn with_listener(mut self, kind: EventKind, listener: Listener) -> Self {
        self.listeners.push((kind, listener));
        self
    }

    /// Builds and returns the controller.
    ///
    /// This consumes the builder and:
    /// - allocates a process-unique id
    /// - injects the breakpoint capability into the script
    /// - attaches the initial listeners
    /// - registers the controller in its registry
    pub fn build(self) -> Controller {
        let registry = self.registry.unwrap_or_else(Registry::global);
        let id = ControllerId::next();
        let unit = inject(self.script, id, Arc::clone(&registry));

        let shared = Arc::new(Shared::new(id, unit, Arc::clone(&registry), self.cfg));
        let controller = Controller::from_shared(Arc::clone(&shared));
        for (kind, listener) in self.listeners {
            controller.on(kind, listener);
        }

        registry.register(&shared);
        controller
    }
}
