//! Test utilities for the storefront crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use tempfile::TempDir;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, Layered, SubscriberExt};

use crate::domain::ports::{DeferredTask, Scheduler};
use crate::outbound::storage::DirKeyValueStore;

/// Scheduler that queues tasks until the test runs them.
///
/// Delays are recorded, never waited for. Tasks deferred while another task
/// runs join the back of the queue.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<VecDeque<(Duration, DeferredTask)>>,
}

impl ManualScheduler {
    /// Delays of the queued tasks, oldest first.
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.lock().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run the oldest queued task. Returns `false` when the queue was empty.
    pub async fn run_next(&self) -> bool {
        let next = self.lock().pop_front();
        match next {
            Some((_, task)) => {
                task.await;
                true
            }
            None => false,
        }
    }

    /// Run tasks until the queue stays empty.
    pub async fn run_all(&self) {
        while self.run_next().await {}
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<(Duration, DeferredTask)>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn defer(&self, delay: Duration, task: DeferredTask) {
        self.lock().push_back((delay, task));
    }
}

/// Clock frozen at one instant. Defaults to the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Clock that always reports `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Directory-backed store in a fresh temporary directory.
///
/// Keep the returned [`TempDir`] alive for as long as the store is used.
///
/// # Panics
///
/// Panics when the temporary directory cannot be created.
pub fn temp_dir_store() -> (TempDir, DirKeyValueStore) {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(error) => panic!("create temp dir: {error}"),
    };
    let store = match DirKeyValueStore::open(dir.path()) {
        Ok(store) => store,
        Err(error) => panic!("open store in {}: {error}", dir.path().display()),
    };
    (dir, store)
}

/// Event recorded by [`LogCapture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Severity of the event.
    pub level: Level,
    /// Rendered `message` field; empty when the event has none.
    pub message: String,
}

/// Tracing layer that keeps every event it sees.
///
/// Attach it to a future with
/// [`WithSubscriber::with_subscriber`](tracing::instrument::WithSubscriber)
/// so only that future's events are captured.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    /// Subscriber forwarding every event to this capture.
    pub fn subscriber(&self) -> Layered<Self, Registry> {
        tracing_subscriber::registry().with(self.clone())
    }

    /// Everything captured so far, in emission order.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured `WARN` and `ERROR` events.
    pub fn problems(&self) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|event| matches!(event.level, Level::WARN | Level::ERROR))
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = MessageField::default();
        event.record(&mut message);
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedEvent {
                level: *event.metadata().level(),
                message: message.0,
            });
    }
}

#[derive(Default)]
struct MessageField(String);

impl Visit for MessageField {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}
