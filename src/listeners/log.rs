//! # LogWriter: lifecycle event logger
//!
//! A minimal listener that renders a controller's [`Event`]s as one-line
//! `tracing` records at `info` level. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [begin] controller=0 script="bubble-sort"
//! [wait] controller=0 line=3 description=1
//! [error] controller=0 label=script_rejected err="rejected: stop"
//! [end] controller=0
//! [destroy] controller=0
//! ```

use std::sync::Arc;

use crate::core::Controller;
use crate::events::{listener, Event, EventKind, Listener};

/// Lifecycle event writer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Subscribes this writer to every event kind of `controller`.
    ///
    /// Returns the listener so it can be removed with [`Controller::off`].
    pub fn attach(self, controller: &Controller) -> Listener {
        let me = Arc::new(self);
        let id = controller.id();
        let script: Arc<str> = Arc::from(controller.name());

        let l = listener(move |ev: &Event| me.write(id.get(), &script, ev));
        for kind in EventKind::ALL {
            controller.on(kind, Arc::clone(&l));
        }
        l
    }

    fn write(&self, id: u64, script: &str, e: &Event) {
        match e {
            Event::Begin => {
                tracing::info!("[begin] controller={id} script={script:?}");
            }
            Event::Wait(ctx) => {
                let info = ctx.info();
                tracing::info!(
                    "[wait] controller={id} line={} description={}",
                    info.line,
                    info.description
                );
            }
            Event::Error(err) => {
                tracing::info!(
                    "[error] controller={id} label={} err={:?}",
                    err.as_label(),
                    err.as_message()
                );
            }
            Event::End => {
                tracing::info!("[end] controller={id}");
            }
            Event::Destroy => {
                tracing::info!("[destroy] controller={id}");
            }
        }
    }
}
