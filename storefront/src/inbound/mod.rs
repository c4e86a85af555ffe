//! Inbound adapters that translate external input into storefront
//! behaviours.

pub mod cli;
