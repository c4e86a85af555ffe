//! Storefront client library modules.
//!
//! The browser-side behaviour of the barbershop storefront (cart sync,
//! booking, pending-appointment resume, page chrome) as a hexagonal client:
//! [`domain`] holds the orchestration, [`outbound`] the adapters and
//! [`inbound`] the command line that drives them.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{SettingsError, StorefrontSettings};
