//! Driven port for fire-and-forget timers.

use std::time::Duration;

use futures_util::future::BoxFuture;

/// Work run once a delay has elapsed.
pub type DeferredTask = BoxFuture<'static, ()>;

/// Runs deferred UI effects (toast fade, delayed navigation, slot
/// reselection).
///
/// Tasks are never cancelled. A task that fires after the page went away
/// mutates nothing that matters.
pub trait Scheduler: Send + Sync {
    /// Run `task` after `delay`.
    fn defer(&self, delay: Duration, task: DeferredTask);
}
