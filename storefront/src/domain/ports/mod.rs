//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cart_api;
mod key_value_store;
mod scheduler;
mod scheduling_api;
mod view;

#[cfg(test)]
pub use cart_api::MockCartApi;
pub use cart_api::{
    CartApi, CartApiError, CartItemRequest, CartReply, CheckoutReply, CheckoutRequest,
    FixtureCartApi, RemoveFromCartRequest,
};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
pub use scheduler::{DeferredTask, Scheduler};
#[cfg(test)]
pub use scheduling_api::MockSchedulingApi;
pub use scheduling_api::{
    AppointmentReply, AuthChallenge, FixtureSchedulingApi, SchedulingApi, SchedulingApiError,
    SlotQuery,
};
#[cfg(test)]
pub use view::{MockSubmitEvent, MockView};
pub use view::{PageElement, SubmitEvent, Toast, ToastId, View};
