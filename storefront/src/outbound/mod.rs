//! Outbound adapters implementing the domain ports.
//!
//! - **http**: reqwest-backed cart and scheduling endpoints
//! - **storage**: directory, in-memory and disabled key-value stores
//! - **scheduler**: Tokio timers for deferred UI effects
//! - **page**: headless page state shared by the views
//! - **terminal**: a `View` rendering onto standard streams
//!
//! Adapters translate between port types and their medium. They contain no
//! storefront logic.

pub mod http;
pub mod page;
pub mod scheduler;
pub mod storage;
pub mod terminal;
