//! Tokio-backed timer adapter.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinSet;

use crate::domain::ports::{DeferredTask, Scheduler};

/// Spawns each deferred task on the current Tokio runtime.
///
/// Must be used from within a runtime. Tasks are tracked so a short-lived
/// process can [`settle`](Self::settle) them before exiting.
#[derive(Debug, Default)]
pub struct TokioScheduler {
    tasks: Mutex<JoinSet<()>>,
}

impl TokioScheduler {
    /// Scheduler with no tasks in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until every deferred task, including tasks deferred by other
    /// tasks, has run.
    pub async fn settle(&self) {
        loop {
            let mut tasks = std::mem::take(
                &mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner),
            );
            if tasks.is_empty() {
                return;
            }
            while tasks.join_next().await.is_some() {}
        }
    }
}

impl Scheduler for TokioScheduler {
    fn defer(&self, delay: Duration, task: DeferredTask) {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .spawn(async move {
                tokio::time::sleep(delay).await;
                task.await;
            });
    }
}
