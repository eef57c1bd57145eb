//! # Example: Action Group
//!
//! Three "generation" actions share one configuration and one event bus. The
//! built-in `LogWriter` renders every lifecycle event through `tracing`.
//!
//! Shows:
//! - aggregate `any_running()` / `running()` while work is outstanding
//! - `cancel_all()` tearing down whatever is still in flight
//! - `wait_idle()` for "all settled"
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example action_group --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use actionvisor::{
    ActionConfig, ActionError, ActionFn, ActionGroup, ActionRef, LogWriter, Subscribe,
};

fn generator(name: &'static str, work_ms: u64) -> ActionRef<String, String> {
    ActionFn::arc(name, move |prompt: String, ctx: CancellationToken| async move {
        tokio::select! {
            _ = ctx.cancelled() => Err(ActionError::Canceled),
            _ = tokio::time::sleep(Duration::from_millis(work_ms)) => {
                Ok(format!("{name}({prompt})"))
            }
        }
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let group = ActionGroup::builder(ActionConfig::default().with_timeout(Duration::from_secs(2)))
        .with_actions([
            generator("caption", 50),
            generator("render", 150),
            generator("upscale", 1_000),
        ])
        .with_subscribers(subs)
        .build()?;

    println!("members: {:?}", group.names());

    let caption = group.execute("caption", "sunset".into())?;
    let _ = group.execute("render", "sunset".into())?;
    let _ = group.execute("upscale", "sunset".into())?;
    println!("running: {:?}", group.running());

    println!("caption -> {:?}", caption.await);
    println!("running: {:?}", group.running());

    tokio::time::sleep(Duration::from_millis(150)).await;
    println!("running: {:?}", group.running());

    group.cancel_all();
    group.wait_idle().await;
    for name in group.names() {
        println!("{name}: {:?}", group.state(name)?.status);
    }

    group.shutdown().await;
    Ok(())
}
