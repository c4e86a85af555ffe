//! Storefront HTTP adapters.
//!
//! A thin reqwest implementation of the `CartApi` and `SchedulingApi` ports.

mod dto;
mod http_api;

pub use http_api::StorefrontHttpApi;
