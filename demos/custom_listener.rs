//! # Example: custom_listener
//!
//! Attaches the built-in [`LogWriter`] next to a custom listener that
//! auto-steps: it resumes every breakpoint as soon as it is reached, except
//! for one line it rejects to show the `error` path.
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example custom_listener --features logging
//! ```

use stepvisor::{
    listener, Breakpoint, BreakpointInfo, Controller, Event, EventKind, LogWriter, ScriptError,
    ScriptFn,
};

/// Line the auto-stepper refuses to execute.
const FORBIDDEN_LINE: u32 = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let script = ScriptFn::arc("countdown", |bp: Breakpoint| async move {
        for line in 1..=5 {
            bp.wait(BreakpointInfo::new(line, 0)).await?;
        }
        Ok::<_, ScriptError>(())
    });

    let ctrl = Controller::new(script);
    LogWriter::new().attach(&ctrl);

    ctrl.on(
        EventKind::Wait,
        listener(|ev: &Event| {
            let Some(ctx) = ev.context() else { return };
            let _ = if ctx.info().line == FORBIDDEN_LINE {
                ctx.reject(format!("line {FORBIDDEN_LINE} is off limits"))
            } else {
                ctx.resume()
            };
        }),
    );
    ctrl.on(
        EventKind::Error,
        listener(|ev: &Event| {
            if let Some(err) = ev.error() {
                println!("[custom] run stopped: {err}");
            }
        }),
    );

    let _ = ctrl.start().await;
    ctrl.destroy();
}
