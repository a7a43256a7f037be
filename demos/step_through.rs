//! # Example: step_through
//!
//! Single-steps a bubble sort. The "UI" is a loop that receives each
//! breakpoint, prints the array and the line being executed, and resumes.
//!
//! Demonstrates how to:
//! - Define a script with [`ScriptFn`] that shares state through `Arc<Mutex<..>>`.
//! - Forward `wait` events to an async observer over a channel.
//! - Resume each breakpoint from outside the script.
//!
//! ## Flow
//! ```text
//! Controller::start()
//!     ├─► emit Begin
//!     ├─► script: bp.wait({line, description}) ─► emit Wait(ctx) ─► channel
//!     │        observer: print state, sleep, ctx.resume()
//!     ├─► ... one Wait per compare/swap ...
//!     └─► emit End
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example step_through
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use stepvisor::{
    listener, Breakpoint, BreakpointInfo, Controller, Event, EventKind, ScriptError, ScriptFn,
    SuspensionContext,
};
use tokio::sync::mpsc;

const LINES: [&str; 3] = [
    "for i in 0..n",
    "  if a[j] > a[j + 1]",
    "    swap(a[j], a[j + 1])",
];

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Data the algorithm works on (shared with the observer for display)
    let data = Arc::new(Mutex::new(vec![5, 1, 4, 2]));

    // 2. The algorithm, with a breakpoint before every logical line
    let script_data = Arc::clone(&data);
    let script = ScriptFn::arc("bubble-sort", move |bp: Breakpoint| {
        let data = Arc::clone(&script_data);
        async move {
            let n = data.lock().unwrap().len();
            for i in 0..n {
                bp.wait(BreakpointInfo::new(0, i as u32)).await?;
                for j in 0..n - 1 - i {
                    bp.wait(BreakpointInfo::new(1, j as u32)).await?;
                    let out_of_order = {
                        let a = data.lock().unwrap();
                        a[j] > a[j + 1]
                    };
                    if out_of_order {
                        bp.wait(BreakpointInfo::new(2, j as u32)).await?;
                        data.lock().unwrap().swap(j, j + 1);
                    }
                }
            }
            Ok::<_, ScriptError>(())
        }
    });

    // 3. Controller + observer channel
    let ctrl = Controller::new(script);
    let (tx, mut rx) = mpsc::unbounded_channel::<SuspensionContext>();
    ctrl.on(
        EventKind::Wait,
        listener(move |ev: &Event| {
            if let Some(ctx) = ev.context() {
                let _ = tx.send(ctx.clone());
            }
        }),
    );
    ctrl.on(EventKind::End, listener(|_| println!("[end]")));

    // 4. Run and step
    let run = ctrl.start();
    let observer_data = Arc::clone(&data);
    let observer = tokio::spawn(async move {
        while let Some(ctx) = rx.recv().await {
            let info = ctx.info();
            println!(
                "{:?}  line {}: {}",
                observer_data.lock().unwrap(),
                info.line,
                LINES[info.line as usize]
            );
            tokio::time::sleep(Duration::from_millis(200)).await;
            let _ = ctx.resume();
        }
    });

    let _ = run.await;
    println!("sorted: {:?}", data.lock().unwrap());

    // 5. Release the controller (drops the observer's sender too)
    ctrl.destroy();
    let _ = observer.await;
}
