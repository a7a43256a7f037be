//! # Example: destroy_while_paused
//!
//! Shows what `destroy()` does (and does not do) to a script paused at a
//! breakpoint.
//!
//! Demonstrates how to:
//! - Keep the [`SuspensionContext`] delivered by a `wait` event.
//! - Destroy the controller while the script is suspended.
//! - Resume the retained context: the script continues, and its next
//!   breakpoint is rejected because the controller is no longer registered.
//!
//! ## Flow
//! ```text
//! start() ─► wait(line 1) ─► ctx retained
//! destroy() ─► deregister, listeners cleared (script still paused)
//! ctx.resume() ─► script continues ─► wait(line 2)
//!                   └─► registry miss ─► warn + reject("The entity has been deleted.")
//!                   └─► script returns Err ─► run ends, status idle
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=stepvisor=debug cargo run --example destroy_while_paused
//! ```

use stepvisor::{
    listener, Breakpoint, BreakpointInfo, Controller, Event, EventKind, ScriptError, ScriptFn,
};
use tokio::sync::oneshot;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let script = ScriptFn::arc("two-steps", |bp: Breakpoint| async move {
        println!("[script] line 1");
        bp.wait(BreakpointInfo::new(1, 0)).await?;
        println!("[script] line 2");
        match bp.wait(BreakpointInfo::new(2, 0)).await {
            Ok(_) => println!("[script] resumed at line 2"),
            Err(e) => {
                println!("[script] line 2 refused: {}", e.as_message());
                return Err(e);
            }
        }
        Ok::<_, ScriptError>(())
    });

    let ctrl = Controller::new(script);

    // Keep the first context that shows up.
    let (tx, rx) = oneshot::channel();
    let tx = std::sync::Mutex::new(Some(tx));
    ctrl.on(
        EventKind::Wait,
        listener(move |ev: &Event| {
            if let (Some(ctx), Some(tx)) = (ev.context(), tx.lock().unwrap().take()) {
                let _ = tx.send(ctx.clone());
            }
        }),
    );
    ctrl.on(EventKind::Destroy, listener(|_| println!("[destroy]")));

    let run = ctrl.start();
    let ctx = rx.await?;
    println!("[main] paused at {}", ctx.info());

    ctrl.destroy();
    println!("[main] registered after destroy: {}", ctrl.is_registered());

    ctx.resume()?;
    run.await?;
    println!("[main] final status: {}", ctrl.status());
    Ok(())
}
