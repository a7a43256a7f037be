//! End-to-end step-through scenarios against the public API.

use std::sync::{Arc, Mutex};

use serde_json::json;
use stepvisor::{
    listener, save_context, Breakpoint, BreakpointInfo, Controller, Event, EventKind, Registry,
    ScriptError, ScriptFn, Status, SuspensionContext, DELETED_MESSAGE,
};
use tokio::sync::mpsc;

type Log = Arc<Mutex<Vec<String>>>;

fn record(ctrl: &Controller) -> Log {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let l = listener(move |ev: &Event| sink.lock().unwrap().push(ev.kind().to_string()));
    for kind in EventKind::ALL {
        ctrl.on(kind, l.clone());
    }
    log
}

fn contexts(ctrl: &Controller) -> mpsc::UnboundedReceiver<SuspensionContext> {
    let (tx, rx) = mpsc::unbounded_channel();
    ctrl.on(
        EventKind::Wait,
        listener(move |ev: &Event| {
            if let Some(ctx) = ev.context() {
                let _ = tx.send(ctx.clone());
            }
        }),
    );
    rx
}

fn single_step() -> Controller {
    Controller::new(ScriptFn::arc("single-step", |bp: Breakpoint| async move {
        bp.wait(BreakpointInfo::new(1, 0)).await?;
        Ok::<_, ScriptError>(())
    }))
}

#[tokio::test]
async fn scenario_single_breakpoint_resolved() {
    let a = single_step();
    let log = record(&a);
    let mut rx = contexts(&a);

    let handle = a.start();
    assert_eq!(*log.lock().unwrap(), vec!["begin"]);

    let ctx = rx.recv().await.unwrap();
    assert_eq!(*ctx.info(), BreakpointInfo { line: 1, description: 0 });
    assert_eq!(*log.lock().unwrap(), vec!["begin", "wait"]);

    ctx.resume().unwrap();
    handle.await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["begin", "wait", "end"]);
    assert_eq!(a.status(), Status::Idle);
    assert_eq!(a.status().to_string(), "idle");
    a.destroy();
}

#[tokio::test]
async fn scenario_script_throws_without_breakpoints() {
    let b = Controller::new(ScriptFn::arc("throws", |_bp: Breakpoint| async {
        Err::<(), _>(ScriptError::fail("uncaught"))
    }));
    let log = record(&b);
    let thrown = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&thrown);
    b.on(
        EventKind::Error,
        listener(move |ev: &Event| *sink.lock().unwrap() = ev.error().cloned()),
    );

    b.start().await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["begin", "error", "end"]);
    assert_eq!(*thrown.lock().unwrap(), Some(ScriptError::fail("uncaught")));
    assert_eq!(b.status(), Status::Idle);
    b.destroy();
}

#[tokio::test]
async fn scenario_destroyed_while_paused_still_completes() {
    let c = single_step();
    let mut rx = contexts(&c);

    let handle = c.start();
    let ctx = rx.recv().await.unwrap();

    c.destroy();
    assert!(Registry::global().lookup(c.id()).is_none());

    ctx.resume().unwrap();
    handle.await.unwrap();
    assert_eq!(c.status(), Status::Idle);
}

#[tokio::test]
async fn routing_to_destroyed_id_rejects_immediately() {
    let ctrl = single_step();
    let id = ctrl.id();
    ctrl.destroy();

    let (ctx, suspension) = SuspensionContext::new(BreakpointInfo::new(3, 0));
    save_context(id, ctx.clone());

    assert!(ctx.is_settled());
    assert_eq!(
        suspension.await,
        Err(ScriptError::Rejected {
            reason: json!(DELETED_MESSAGE)
        })
    );
}

#[tokio::test]
async fn ids_keep_increasing_after_destroy() {
    let first = single_step();
    let first_id = first.id();
    first.destroy();

    let second = single_step();
    let third = single_step();
    assert!(first_id < second.id());
    assert!(second.id() < third.id());
    second.destroy();
    third.destroy();
}

#[tokio::test]
async fn two_controllers_never_cross_deliver() {
    let left = Controller::new(ScriptFn::arc("left", |bp: Breakpoint| async move {
        bp.wait(BreakpointInfo::new(10, 0)).await?;
        Ok::<_, ScriptError>(())
    }));
    let right = Controller::new(ScriptFn::arc("right", |bp: Breakpoint| async move {
        bp.wait(BreakpointInfo::new(20, 0)).await?;
        Ok::<_, ScriptError>(())
    }));
    let mut left_rx = contexts(&left);
    let mut right_rx = contexts(&right);

    let lh = left.start();
    let rh = right.start();

    let lctx = left_rx.recv().await.unwrap();
    let rctx = right_rx.recv().await.unwrap();
    assert_eq!(lctx.info().line, 10);
    assert_eq!(rctx.info().line, 20);
    assert!(left_rx.try_recv().is_err());
    assert!(right_rx.try_recv().is_err());

    rctx.resume().unwrap();
    rh.await.unwrap();
    assert_eq!(left.status(), Status::Running);

    lctx.resume().unwrap();
    lh.await.unwrap();

    left.destroy();
    right.destroy();
}

#[tokio::test]
async fn off_removes_one_listener_only() {
    let ctrl = single_step();
    let hits = Arc::new(Mutex::new(Vec::new()));

    let a = {
        let hits = Arc::clone(&hits);
        listener(move |_| hits.lock().unwrap().push("a"))
    };
    let b = {
        let hits = Arc::clone(&hits);
        listener(move |_| hits.lock().unwrap().push("b"))
    };
    ctrl.on(EventKind::Begin, a.clone());
    ctrl.on(EventKind::Begin, b);

    assert!(ctrl.off(EventKind::Begin, &a));
    ctrl.emit(&Event::Begin);
    ctrl.emit(&Event::End);

    assert_eq!(*hits.lock().unwrap(), vec!["b"]);
    ctrl.destroy();
}
