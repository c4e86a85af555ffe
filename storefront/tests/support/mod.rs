//! Shared helpers for the storefront behaviour suites.

mod fake_server;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use storefront::domain::ports::{KeyValueStore, SubmitEvent};
use storefront::domain::{Storefront, StorefrontPorts};
use storefront::outbound::page::InMemoryPage;
use storefront::test_support::{FixedClock, ManualScheduler};

pub use fake_server::{
    FakeStorefrontServer, LOGIN_WALL_MESSAGE, OUT_OF_STOCK_MESSAGE, SLOT_TAKEN_MESSAGE,
};

/// One page load: a storefront over its own page and timers, sharing the
/// server session and the cart cache store with other visits.
#[derive(Clone)]
pub struct Visit {
    pub storefront: Storefront,
    pub page: Arc<InMemoryPage>,
    pub scheduler: Arc<ManualScheduler>,
}

pub fn visit(
    server: &FakeStorefrontServer,
    store: Arc<dyn KeyValueStore>,
    page: InMemoryPage,
) -> Visit {
    let page = Arc::new(page);
    let scheduler = Arc::new(ManualScheduler::default());
    let storefront = Storefront::new(StorefrontPorts {
        cart_api: Arc::new(server.clone()),
        scheduling_api: Arc::new(server.clone()),
        store,
        view: page.clone(),
        scheduler: scheduler.clone(),
        clock: Arc::new(FixedClock::default()),
    });
    Visit {
        storefront,
        page,
        scheduler,
    }
}

/// Submission that counts suppressed native submits.
#[derive(Debug, Default)]
pub struct FormSubmission {
    prevented: AtomicUsize,
}

impl FormSubmission {
    pub fn prevented(&self) -> usize {
        self.prevented.load(Ordering::SeqCst)
    }
}

impl SubmitEvent for FormSubmission {
    fn prevent_default(&self) {
        self.prevented.fetch_add(1, Ordering::SeqCst);
    }
}
