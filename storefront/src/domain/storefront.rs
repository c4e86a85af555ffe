//! Wires the storefront components over one set of ports.

use std::sync::Arc;

use mockable::Clock;
use url::Url;

use crate::domain::ports::{CartApi, KeyValueStore, SchedulingApi, Scheduler, View};
use crate::domain::{
    CartClient, LocalCartCache, PageChrome, PendingAppointmentResumer, ResumeOutcome,
    SchedulingClient,
};

/// Port bundle required by [`Storefront`].
pub struct StorefrontPorts {
    /// Cart endpoints.
    pub cart_api: Arc<dyn CartApi>,
    /// Appointment endpoints.
    pub scheduling_api: Arc<dyn SchedulingApi>,
    /// Storage backing the local cart cache.
    pub store: Arc<dyn KeyValueStore>,
    /// Rendered page.
    pub view: Arc<dyn View>,
    /// Timers for deferred UI effects.
    pub scheduler: Arc<dyn Scheduler>,
    /// Source of "today" for the date floor.
    pub clock: Arc<dyn Clock>,
}

/// Every behaviour of the storefront page.
#[derive(Clone)]
pub struct Storefront {
    cart: CartClient,
    scheduling: SchedulingClient,
    resumer: PendingAppointmentResumer,
    chrome: PageChrome,
}

impl Storefront {
    /// Assemble the components over `ports`.
    pub fn new(ports: StorefrontPorts) -> Self {
        let StorefrontPorts {
            cart_api,
            scheduling_api,
            store,
            view,
            scheduler,
            clock,
        } = ports;

        let cart = CartClient::new(
            cart_api,
            LocalCartCache::new(store),
            Arc::clone(&view),
            Arc::clone(&scheduler),
        );
        let scheduling = SchedulingClient::new(
            Arc::clone(&scheduling_api),
            Arc::clone(&view),
            Arc::clone(&scheduler),
        );
        let resumer = PendingAppointmentResumer::new(
            scheduling_api,
            Arc::clone(&view),
            scheduler,
            scheduling.clone(),
        );
        let chrome = PageChrome::new(view, clock);

        Self {
            cart,
            scheduling,
            resumer,
            chrome,
        }
    }

    /// Cart operations.
    pub fn cart(&self) -> &CartClient {
        &self.cart
    }

    /// Slot lookup and booking.
    pub fn scheduling(&self) -> &SchedulingClient {
        &self.scheduling
    }

    /// Pending-appointment resume flow.
    pub fn resumer(&self) -> &PendingAppointmentResumer {
        &self.resumer
    }

    /// Sidebar, scroll and date-floor behaviour.
    pub fn chrome(&self) -> &PageChrome {
        &self.chrome
    }

    /// Run the load-time behaviour: date floor first, then the resume flow.
    pub async fn on_page_load(&self, page_url: &Url) -> ResumeOutcome {
        self.chrome.apply_date_floor();
        self.resumer.resume(page_url).await
    }
}
