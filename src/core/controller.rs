//! # ActionController: lifecycle of one named action.
//!
//! Wraps an [`Action`](crate::Action) and owns everything about its invocations:
//! supersession, deduplication, cancellation, timeout and result/error capture.
//!
//! ## Invocation flow
//! ```text
//! execute(args)
//!   ├─► prevent_duplicate_calls && in flight ─► return pending Execution (ActionDeduplicated)
//!   ├─► cancel previous handle                 (ActionSuperseded)
//!   ├─► id += 1, child token of root token
//!   ├─► state = Running { invocation: id }     (ActionStarting)
//!   └─► tokio::spawn(run_once(action.spawn(args, token), timeout))
//!                         │
//!                         ▼
//!                  settle(id, outcome)
//!                    ├─ id != current ─► drop outcome        (ActionDiscarded), Execution → None
//!                    ├─ Ok(v)         ─► Succeeded, on_success(&v)  (ActionSucceeded), → Some(v)
//!                    ├─ Err(Fail)     ─► Failed,    on_error(&e)    (ActionFailed),    → None
//!                    ├─ Err(Timeout)  ─► Failed,    on_error(&e)    (ActionFailed),    → None
//!                    └─ Err(Canceled) ─► Cancelled                  (ActionCancelled), → None
//! ```
//!
//! ## Rules
//! - At most one handle is current; "last `execute()` wins" regardless of completion order.
//! - Settlement compares invocation ids under the slot lock; stale outcomes never touch state.
//! - [`Execution`] never fails: errors are visible only through state and `on_error`.
//! - `cancel()` resets to `Idle`; `reset()` clears state but leaves in-flight work running.
//! - Dropping the controller cancels its root token, which cancels any in-flight invocation.
//! - Hooks run after the lock is released, so they may call back into the controller.
//! - A panic while the action builds its future settles the invocation as `Failed`.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::{broadcast, oneshot, watch};
use tokio_util::sync::CancellationToken;

use crate::{
    actions::ActionRef,
    config::ActionConfig,
    core::runner::run_once,
    core::state::{ActionState, ActionStatus},
    error::ActionError,
    events::{Bus, Event, EventKind},
    subscribers::panic_message,
};

/// Future returned by [`ActionController::execute`].
///
/// Cloneable; every clone resolves to the same value. Resolves to `Some(value)`
/// on success and `None` on failure, timeout, cancellation or supersession.
pub type Execution<T> = Shared<BoxFuture<'static, Option<T>>>;

/// The live invocation of a controller.
struct InFlight<T> {
    id: u64,
    token: CancellationToken,
    execution: Execution<T>,
}

/// Invocation bookkeeping guarded by one lock.
struct Slot<T> {
    /// Last allocated invocation id (monotonic, starts at 1).
    last_id: u64,
    in_flight: Option<InFlight<T>>,
}

/// State shared with spawned invocations (they hold it weakly).
struct Inner<T> {
    name: Arc<str>,
    config: ActionConfig<T>,
    bus: Bus,
    slot: Mutex<Slot<T>>,
    state: watch::Sender<ActionState<T>>,
}

impl<T> Inner<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn slot(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, kind: EventKind, invocation: u64) {
        self.bus.publish(
            Event::new(kind)
                .with_action(Arc::clone(&self.name))
                .with_invocation(invocation),
        );
    }

    /// Applies an invocation outcome if `id` is still current.
    fn settle(&self, id: u64, outcome: Result<T, ActionError>) -> Option<T> {
        {
            let mut slot = self.slot();
            if slot.in_flight.as_ref().map(|h| h.id) != Some(id) {
                drop(slot);
                tracing::debug!(action = %self.name, invocation = id, "stale outcome discarded");
                self.publish(EventKind::ActionDiscarded, id);
                return None;
            }
            slot.in_flight = None;

            let next = match &outcome {
                Ok(value) => ActionState::succeeded(id, value.clone()),
                Err(e) if e.is_reportable() => ActionState::failed(id, e.clone()),
                Err(_) => ActionState::cancelled(id),
            };
            self.state.send_replace(next);
        }

        match outcome {
            Ok(value) => {
                self.publish(EventKind::ActionSucceeded, id);
                if let Some(hook) = &self.config.on_success {
                    hook(&value);
                }
                Some(value)
            }
            Err(e) if e.is_reportable() => {
                self.bus.publish(
                    Event::new(EventKind::ActionFailed)
                        .with_action(Arc::clone(&self.name))
                        .with_invocation(id)
                        .with_reason(e.to_string()),
                );
                if let Some(hook) = &self.config.on_error {
                    hook(&e);
                }
                None
            }
            Err(_) => {
                self.publish(EventKind::ActionCancelled, id);
                None
            }
        }
    }

    /// Tears down the in-flight handle, if any. Returns its invocation id.
    fn cancel_in_flight(&self) -> Option<u64> {
        let id = {
            let mut slot = self.slot();
            let handle = slot.in_flight.take()?;
            handle.token.cancel();
            self.state.send_modify(ActionState::clear);
            handle.id
        };
        self.publish(EventKind::CancelRequested, id);
        Some(id)
    }
}

/// Owns the lifecycle of one named asynchronous action.
///
/// ### Responsibilities
/// - **Supersession**: a new `execute()` cancels the running invocation
/// - **Deduplication**: optional attach-to-in-flight instead of restarting
/// - **Timeouts**: per-invocation deadline recorded as [`ActionError::Timeout`]
/// - **State**: [`ActionState`] snapshot and `watch` stream for UIs
/// - **Events**: lifecycle events published to its [`Bus`]
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use actionvisor::{ActionConfig, ActionController, ActionFn, ActionRef, ActionStatus};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let caption: ActionRef<String, String> =
///         ActionFn::arc("caption", |topic: String, _ctx: CancellationToken| async move {
///             Ok(format!("Meet {topic}"))
///         });
///
///     let ctrl = ActionController::new(
///         caption,
///         ActionConfig::default().with_timeout(Duration::from_secs(5)),
///     );
///
///     let out = ctrl.execute("the new lineup".to_string()).await;
///     assert_eq!(out.as_deref(), Some("Meet the new lineup"));
///     assert_eq!(ctrl.status(), ActionStatus::Succeeded);
/// }
/// ```
pub struct ActionController<Args, T> {
    action: ActionRef<Args, T>,
    inner: Arc<Inner<T>>,
    root: CancellationToken,
}

impl<Args, T> ActionController<Args, T>
where
    Args: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates a controller with its own event bus.
    pub fn new(action: ActionRef<Args, T>, config: ActionConfig<T>) -> Self {
        let bus = Bus::new(config.bus_capacity_clamped());
        Self::with_bus(action, config, bus)
    }

    /// Creates a controller publishing to an existing bus.
    pub fn with_bus(action: ActionRef<Args, T>, config: ActionConfig<T>, bus: Bus) -> Self {
        let (state, _rx) = watch::channel(ActionState::default());
        let inner = Arc::new(Inner {
            name: Arc::from(action.name()),
            config,
            bus,
            slot: Mutex::new(Slot {
                last_id: 0,
                in_flight: None,
            }),
            state,
        });
        Self {
            action,
            inner,
            root: CancellationToken::new(),
        }
    }

    /// Starts an invocation (or attaches to the running one, see `prevent_duplicate_calls`).
    ///
    /// The invocation starts immediately on a spawned task; awaiting the returned
    /// [`Execution`] is optional. Must be called inside a Tokio runtime.
    pub fn execute(&self, args: Args) -> Execution<T> {
        let inner = &self.inner;

        let (id, token, superseded, execution, tx) = {
            let mut slot = inner.slot();

            if inner.config.prevent_duplicate_calls {
                let pending = slot.in_flight.as_ref().map(|h| (h.id, h.execution.clone()));
                if let Some((id, execution)) = pending {
                    drop(slot);
                    inner.publish(EventKind::ActionDeduplicated, id);
                    return execution;
                }
            }

            let superseded = slot.in_flight.take().map(|prev| {
                prev.token.cancel();
                prev.id
            });

            slot.last_id += 1;
            let id = slot.last_id;
            let token = self.root.child_token();
            let (tx, rx) = oneshot::channel::<Option<T>>();
            let execution: Execution<T> = rx.map(|r| r.ok().flatten()).boxed().shared();

            slot.in_flight = Some(InFlight {
                id,
                token: token.clone(),
                execution: execution.clone(),
            });
            inner.state.send_replace(ActionState::running(id));
            (id, token, superseded, execution, tx)
        };

        if let Some(prev) = superseded {
            inner.publish(EventKind::ActionSuperseded, prev);
        }
        inner.publish(EventKind::ActionStarting, id);

        let spawned =
            panic::catch_unwind(AssertUnwindSafe(|| self.action.spawn(args, token.clone())));
        let fut = match spawned {
            Ok(fut) => fut,
            Err(payload) => {
                let msg = panic_message(&*payload);
                tracing::warn!(
                    action = %inner.name,
                    invocation = id,
                    panic = %msg,
                    "action panicked before start"
                );
                let value = inner.settle(id, Err(ActionError::fail(format!("panicked: {msg}"))));
                let _ = tx.send(value);
                return execution;
            }
        };
        let weak: Weak<Inner<T>> = Arc::downgrade(inner);
        let name = Arc::clone(&inner.name);
        let bus = inner.bus.clone();
        let timeout = inner.config.default_timeout();

        tokio::spawn(async move {
            let outcome = run_once(&name, id, fut, &token, timeout, &bus).await;
            let value = match weak.upgrade() {
                Some(inner) => inner.settle(id, outcome),
                None => None,
            };
            let _ = tx.send(value);
        });

        execution
    }

    /// Cancels the in-flight invocation and resets state to `Idle`.
    ///
    /// Idempotent: with nothing in flight this is a no-op.
    pub fn cancel(&self) {
        self.inner.cancel_in_flight();
    }

    /// Clears state to `Idle` without cancelling in-flight work.
    ///
    /// An invocation that is still running stays current and will write its
    /// outcome into state when it settles. Call [`cancel`](Self::cancel) as well
    /// if that late write is unwanted.
    pub fn reset(&self) {
        let id = {
            let slot = self.inner.slot();
            self.inner.state.send_modify(ActionState::clear);
            slot.last_id
        };
        self.inner.publish(EventKind::ActionReset, id);
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> ActionState<T> {
        self.inner.state.borrow().clone()
    }

    /// Returns the current status.
    pub fn status(&self) -> ActionStatus {
        self.inner.state.borrow().status
    }

    /// True while status is `Running`.
    pub fn is_running(&self) -> bool {
        self.status() == ActionStatus::Running
    }

    /// Invocation id of the live handle, if any.
    pub fn in_flight(&self) -> Option<u64> {
        self.inner.slot().in_flight.as_ref().map(|h| h.id)
    }

    /// Subscribes to state changes.
    pub fn watch(&self) -> watch::Receiver<ActionState<T>> {
        self.inner.state.subscribe()
    }

    /// Action name (used in events).
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Bus this controller publishes to.
    pub fn bus(&self) -> &Bus {
        &self.inner.bus
    }

    /// Raw receiver of this controller's bus events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.inner.bus.subscribe()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ActionConfig<T> {
        &self.inner.config
    }

    pub(crate) fn cancel_in_flight(&self) -> Option<u64> {
        self.inner.cancel_in_flight()
    }
}

impl<Args, T> Drop for ActionController<Args, T> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

impl<Args, T> fmt::Debug for ActionController<Args, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionController")
            .field("name", &self.inner.name)
            .field("status", &self.inner.state.borrow().status)
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::{Instant, sleep};

    use crate::actions::ActionFn;

    /// Sleeps `ms` then returns `label`.
    fn delayed() -> ActionRef<(u64, &'static str), String> {
        ActionFn::arc(
            "delayed",
            |(ms, label): (u64, &'static str), _ctx: CancellationToken| async move {
                sleep(Duration::from_millis(ms)).await;
                Ok(label.to_string())
            },
        )
    }

    fn never() -> ActionRef<(), u32> {
        ActionFn::arc("never", |_: (), _ctx: CancellationToken| {
            std::future::pending::<Result<u32, ActionError>>()
        })
    }

    fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (Arc::new(AtomicUsize::new(0)), Arc::new(AtomicUsize::new(0)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_execute_wins() {
        let (ok, _) = counter();
        let ok_hook = ok.clone();
        let ctrl = ActionController::new(
            delayed(),
            ActionConfig::default().with_on_success(move |_| {
                ok_hook.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let a = ctrl.execute((100, "A"));
        let b = ctrl.execute((10, "B"));
        sleep(Duration::from_millis(150)).await;

        let state = ctrl.state();
        assert_eq!(state.status, ActionStatus::Succeeded);
        assert_eq!(state.result.as_deref(), Some("B"));
        assert_eq!(state.invocation, 2);
        assert_eq!(a.await, None);
        assert_eq!(b.await.as_deref(), Some("B"));
        assert_eq!(ok.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_invocation_sees_cancelled_token() {
        let seen: Arc<Mutex<Vec<CancellationToken>>> = Arc::default();
        let tokens = seen.clone();
        let action: ActionRef<(), ()> = ActionFn::arc("grab", move |_: (), ctx: CancellationToken| {
            if let Ok(mut v) = tokens.lock() {
                v.push(ctx);
            }
            std::future::pending::<Result<(), ActionError>>()
        });
        let ctrl = ActionController::new(action, ActionConfig::default());

        let _first = ctrl.execute(());
        let _second = ctrl.execute(());

        let tokens = seen.lock().map(|v| v.clone()).unwrap_or_default();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].is_cancelled());
        assert!(!tokens[1].is_cancelled());
        assert_eq!(ctrl.in_flight(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dedup_shares_one_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let action: ActionRef<u32, u32> = ActionFn::arc("dedup", move |n: u32, _ctx: CancellationToken| {
            c.fetch_add(1, Ordering::SeqCst);
            async move {
                sleep(Duration::from_millis(20)).await;
                Ok(n * 10)
            }
        });
        let ctrl = ActionController::new(
            action,
            ActionConfig::default().with_prevent_duplicate_calls(true),
        );

        let first = ctrl.execute(1);
        let second = ctrl.execute(2);
        let (a, b) = tokio::join!(first, second);

        assert_eq!(a, Some(10));
        assert_eq!(b, Some(10));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Once settled, the next call starts a fresh invocation.
        assert_eq!(ctrl.execute(3).await, Some(30));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_marks_failed_and_resolves() {
        let (_, errs) = counter();
        let err_hook = errs.clone();
        let ctrl = ActionController::new(
            never(),
            ActionConfig::default()
                .with_timeout(Duration::from_millis(50))
                .with_on_error(move |_| {
                    err_hook.fetch_add(1, Ordering::SeqCst);
                }),
        );

        let started = Instant::now();
        let out = ctrl.execute(()).await;

        assert_eq!(out, None);
        assert!(started.elapsed() >= Duration::from_millis(50));
        let state = ctrl.state();
        assert_eq!(state.status, ActionStatus::Failed);
        assert_eq!(
            state.error,
            Some(ActionError::Timeout {
                timeout: Duration::from_millis(50)
            })
        );
        assert_eq!(errs.load(Ordering::SeqCst), 1);
        assert_eq!(ctrl.in_flight(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_resets_to_idle() {
        let (ok, errs) = counter();
        let (ok_hook, err_hook) = (ok.clone(), errs.clone());
        let ctrl = ActionController::new(
            delayed(),
            ActionConfig::default()
                .with_on_success(move |_| {
                    ok_hook.fetch_add(1, Ordering::SeqCst);
                })
                .with_on_error(move |_| {
                    err_hook.fetch_add(1, Ordering::SeqCst);
                }),
        );

        let exec = ctrl.execute((30, "late"));
        assert!(ctrl.is_running());
        ctrl.cancel();

        let state = ctrl.state();
        assert_eq!(state.status, ActionStatus::Idle);
        assert_eq!(state.result, None);
        assert_eq!(state.error, None);
        assert_eq!(ctrl.in_flight(), None);

        assert_eq!(exec.await, None);
        sleep(Duration::from_millis(50)).await;
        assert_eq!(ctrl.status(), ActionStatus::Idle);
        assert_eq!(ok.load(Ordering::SeqCst), 0);
        assert_eq!(errs.load(Ordering::SeqCst), 0);

        // Idempotent.
        ctrl.cancel();
        assert_eq!(ctrl.status(), ActionStatus::Idle);
    }

    #[tokio::test]
    async fn test_cancel_when_idle_keeps_settled_state() {
        let ctrl = ActionController::new(delayed(), ActionConfig::default());
        assert_eq!(ctrl.execute((0, "done")).await.as_deref(), Some("done"));

        ctrl.cancel();
        assert_eq!(ctrl.status(), ActionStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_failure_never_rejects() {
        let (ok, errs) = counter();
        let (ok_hook, err_hook) = (ok.clone(), errs.clone());
        let action: ActionRef<(), u32> = ActionFn::arc("boom", |_: (), _ctx: CancellationToken| async {
            Err::<u32, _>(ActionError::fail("upstream 503"))
        });
        let ctrl = ActionController::new(
            action,
            ActionConfig::default()
                .with_on_success(move |_| {
                    ok_hook.fetch_add(1, Ordering::SeqCst);
                })
                .with_on_error(move |_| {
                    err_hook.fetch_add(1, Ordering::SeqCst);
                }),
        );

        assert_eq!(ctrl.execute(()).await, None);
        let state = ctrl.state();
        assert_eq!(state.status, ActionStatus::Failed);
        assert_eq!(state.error, Some(ActionError::fail("upstream 503")));
        assert_eq!(state.result, None);
        assert_eq!(errs.load(Ordering::SeqCst), 1);
        assert_eq!(ok.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_without_hook_is_recorded_only() {
        let action: ActionRef<(), u32> = ActionFn::arc("boom", |_: (), _ctx: CancellationToken| async {
            Err::<u32, _>(ActionError::fail("nope"))
        });
        let ctrl = ActionController::new(action, ActionConfig::default());

        assert_eq!(ctrl.execute(()).await, None);
        assert_eq!(ctrl.status(), ActionStatus::Failed);
    }

    #[tokio::test]
    async fn test_self_abort_is_cancelled_not_failed() {
        let (_, errs) = counter();
        let err_hook = errs.clone();
        let action: ActionRef<(), u32> = ActionFn::arc("abort", |_: (), _ctx: CancellationToken| async {
            Err::<u32, _>(ActionError::Canceled)
        });
        let ctrl = ActionController::new(
            action,
            ActionConfig::default().with_on_error(move |_| {
                err_hook.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(ctrl.execute(()).await, None);
        let state = ctrl.state();
        assert_eq!(state.status, ActionStatus::Cancelled);
        assert_eq!(state.error, None);
        assert_eq!(errs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_panic_is_recorded_as_failure() {
        fn explode() -> u32 {
            panic!("bad prompt")
        }
        let action: ActionRef<(), u32> =
            ActionFn::arc("panics", |_: (), _ctx: CancellationToken| async { Ok(explode()) });
        let ctrl = ActionController::new(action, ActionConfig::default());

        assert_eq!(ctrl.execute(()).await, None);
        assert_eq!(ctrl.state().error, Some(ActionError::fail("panicked: bad prompt")));
    }

    #[tokio::test]
    async fn test_panic_while_starting_does_not_wedge_controller() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let action: ActionRef<(), u32> = ActionFn::arc("cold", move |_: (), _ctx: CancellationToken| {
            if c.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("cold start");
            }
            async { Ok(7) }
        });
        let ctrl = ActionController::new(
            action,
            ActionConfig::default().with_prevent_duplicate_calls(true),
        );

        assert_eq!(ctrl.execute(()).await, None);
        let state = ctrl.state();
        assert_eq!(state.status, ActionStatus::Failed);
        assert_eq!(state.error, Some(ActionError::fail("panicked: cold start")));
        assert_eq!(ctrl.in_flight(), None);

        assert_eq!(ctrl.execute(()).await, Some(7));
        assert_eq!(ctrl.status(), ActionStatus::Succeeded);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_leaves_in_flight_running() {
        let ctrl = ActionController::new(delayed(), ActionConfig::default());

        let exec = ctrl.execute((20, "kept"));
        ctrl.reset();
        assert_eq!(ctrl.status(), ActionStatus::Idle);
        assert_eq!(ctrl.in_flight(), Some(1));

        assert_eq!(exec.await.as_deref(), Some("kept"));
        let state = ctrl.state();
        assert_eq!(state.status, ActionStatus::Succeeded);
        assert_eq!(state.result.as_deref(), Some("kept"));
    }

    #[tokio::test]
    async fn test_new_invocation_clears_previous_result() {
        let ctrl = ActionController::new(delayed(), ActionConfig::default());
        assert!(ctrl.execute((0, "one")).await.is_some());

        let exec = ctrl.execute((5, "two"));
        let state = ctrl.state();
        assert_eq!(state.status, ActionStatus::Running);
        assert_eq!(state.result, None);
        assert_eq!(state.error, None);
        assert_eq!(exec.await.as_deref(), Some("two"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_in_flight() {
        let seen: Arc<Mutex<Option<CancellationToken>>> = Arc::default();
        let slot = seen.clone();
        let action: ActionRef<(), ()> = ActionFn::arc("owned", move |_: (), ctx: CancellationToken| {
            if let Ok(mut s) = slot.lock() {
                *s = Some(ctx);
            }
            std::future::pending::<Result<(), ActionError>>()
        });
        let ctrl = ActionController::new(action, ActionConfig::default());

        let exec = ctrl.execute(());
        drop(ctrl);

        assert_eq!(exec.await, None);
        let token = seen.lock().ok().and_then(|s| s.clone());
        assert!(token.is_some_and(|t| t.is_cancelled()));
    }

    #[tokio::test]
    async fn test_hooks_may_reenter_controller() {
        let holder: Arc<Mutex<Option<Arc<ActionController<(u64, &'static str), String>>>>> =
            Arc::default();
        let h = holder.clone();
        let statuses: Arc<Mutex<Vec<ActionStatus>>> = Arc::default();
        let s = statuses.clone();

        let ctrl = Arc::new(ActionController::new(
            delayed(),
            ActionConfig::default().with_on_success(move |_| {
                let ctrl = h.lock().ok().and_then(|g| g.clone());
                if let (Some(ctrl), Ok(mut out)) = (ctrl, s.lock()) {
                    out.push(ctrl.status());
                }
            }),
        ));
        if let Ok(mut g) = holder.lock() {
            *g = Some(ctrl.clone());
        }

        assert!(ctrl.execute((0, "x")).await.is_some());
        let seen = statuses.lock().map(|v| v.clone()).unwrap_or_default();
        assert_eq!(seen, vec![ActionStatus::Succeeded]);

        // Break the cycle.
        if let Ok(mut g) = holder.lock() {
            g.take();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_follow_lifecycle() {
        let ctrl = ActionController::new(delayed(), ActionConfig::default());
        let mut rx = ctrl.subscribe();

        let _ = ctrl.execute((50, "old"));
        let latest = ctrl.execute((10, "new"));
        assert!(latest.await.is_some());
        sleep(Duration::from_millis(100)).await;

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            assert_eq!(ev.action.as_deref(), Some("delayed"));
            kinds.push((ev.kind, ev.invocation));
        }
        assert_eq!(kinds[0], (EventKind::ActionStarting, Some(1)));
        assert_eq!(kinds[1], (EventKind::ActionSuperseded, Some(1)));
        assert_eq!(kinds[2], (EventKind::ActionStarting, Some(2)));
        assert!(kinds.contains(&(EventKind::ActionSucceeded, Some(2))));
        assert!(kinds.contains(&(EventKind::ActionDiscarded, Some(1))));
    }

    #[tokio::test]
    async fn test_watch_observes_transitions() {
        let ctrl = ActionController::new(delayed(), ActionConfig::default());
        let mut rx = ctrl.watch();

        let exec = ctrl.execute((0, "w"));
        assert!(rx.borrow_and_update().is_running());

        assert!(rx.wait_for(|s| s.status == ActionStatus::Succeeded).await.is_ok());
        assert_eq!(exec.await.as_deref(), Some("w"));
    }
}
