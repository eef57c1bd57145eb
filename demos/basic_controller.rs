//! # Example: Basic Controller
//!
//! Demonstrates the controller lifecycle on a single action:
//! - a second `execute()` supersedes the first (latest wins)
//! - `prevent_duplicate_calls` attaches callers to the running invocation
//! - a stuck invocation hits the timeout and reports through `on_error`
//!
//! ## Run
//! ```bash
//! cargo run --example basic_controller
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use actionvisor::{ActionConfig, ActionController, ActionError, ActionFn, ActionRef};

/// Simulated search backend: sleeps `delay_ms` and echoes the query.
fn search(calls: Arc<AtomicUsize>) -> ActionRef<(String, u64), String> {
    ActionFn::arc("search", move |(query, delay_ms): (String, u64), ctx: CancellationToken| {
        calls.fetch_add(1, Ordering::Relaxed);
        async move {
            tokio::select! {
                _ = ctx.cancelled() => {
                    println!("[search] '{query}' cancelled");
                    Err(ActionError::Canceled)
                }
                _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => {
                    Ok(format!("results for '{query}'"))
                }
            }
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));

    // 1. Latest wins.
    let ctrl = ActionController::new(
        search(calls.clone()),
        ActionConfig::default()
            .with_on_success(|out: &String| println!("[hook] success: {out}"))
            .with_on_error(|e: &ActionError| println!("[hook] error: {e}")),
    );
    let slow = ctrl.execute(("rust".into(), 200));
    let fast = ctrl.execute(("rust async".into(), 20));
    println!("slow -> {:?}", slow.await);
    println!("fast -> {:?}", fast.await);
    println!("state: {:?}\n", ctrl.state().status);

    // 2. Deduplicated calls share one invocation.
    let dedup = ActionController::new(
        search(calls.clone()),
        ActionConfig::default().with_prevent_duplicate_calls(true),
    );
    let before = calls.load(Ordering::Relaxed);
    let a = dedup.execute(("tokio".into(), 50));
    let b = dedup.execute(("ignored".into(), 50));
    let (a, b) = tokio::join!(a, b);
    println!("dedup a={a:?} b={b:?} backend calls={}\n", calls.load(Ordering::Relaxed) - before);

    // 3. Timeout.
    let bounded = ActionController::new(
        search(calls),
        ActionConfig::default()
            .with_timeout(Duration::from_millis(50))
            .with_on_error(|e: &ActionError| println!("[hook] {}: {e}", e.as_label())),
    );
    let out = bounded.execute(("never".into(), 10_000)).await;
    println!("timeout -> {out:?}, error = {:?}", bounded.state().error);

    Ok(())
}
