//! # Observer: pumps a [`Bus`] into a [`SubscriberSet`].
//!
//! ```text
//! Bus.subscribe() ──► listener task ──► SubscriberSet::emit(Arc<Event>)
//!        ▲                 │
//!        │          stop token cancelled ──► drain receiver ──► SubscriberSet::shutdown()
//!   controllers
//! ```
//!
//! ## Rules
//! - Events published **before** [`Observer::spawn`] are not observed.
//! - A lagging listener reports `SubscriberOverflow` (reason `lagged`) to its
//!   subscribers directly; it is not republished on the bus.
//! - Dropping the observer stops the listener; [`Observer::shutdown`] additionally
//!   waits until every subscriber has processed what was delivered.

use std::sync::Arc;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Background listener delivering bus events to subscribers.
pub struct Observer {
    stop: CancellationToken,
    join: Option<JoinHandle<()>>,
}

impl Observer {
    /// Subscribes to `bus` and starts delivering events to `subs`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn spawn(subs: Vec<Arc<dyn Subscribe>>, bus: &Bus) -> Self {
        let set = SubscriberSet::new(subs, bus.clone());
        let mut rx = bus.subscribe();
        let stop = CancellationToken::new();
        let token = stop.clone();

        let join = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(Arc::new(ev)),
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(_)) => {
                            set.emit(Arc::new(Event::subscriber_overflow("observer", "lagged")));
                        }
                    }
                }
            }
            loop {
                match rx.try_recv() {
                    Ok(ev) => set.emit(Arc::new(ev)),
                    Err(TryRecvError::Lagged(_)) => continue,
                    Err(_) => break,
                }
            }
            set.shutdown().await;
        });

        Self {
            stop,
            join: Some(join),
        }
    }

    /// Stops the listener and waits for subscribers to finish queued work.
    pub async fn shutdown(mut self) {
        self.stop.cancel();
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recorder(Arc<Mutex<Vec<EventKind>>>);

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(event.kind);
            }
        }
        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    #[tokio::test]
    async fn test_delivers_in_publish_order() {
        let bus = Bus::new(32);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let observer = Observer::spawn(vec![Arc::new(Recorder(seen.clone()))], &bus);

        bus.publish(Event::new(EventKind::ActionStarting));
        bus.publish(Event::new(EventKind::ActionSucceeded));
        tokio::task::yield_now().await;
        observer.shutdown().await;

        let seen = seen.lock().map(|v| v.clone()).unwrap_or_default();
        assert_eq!(seen, vec![EventKind::ActionStarting, EventKind::ActionSucceeded]);
    }
}
