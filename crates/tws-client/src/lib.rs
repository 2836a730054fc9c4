//! tws-client
//!
//! Async TCP driver for the `tws-protocol` session engine.

pub mod config;
pub mod runner;
pub mod transport;
pub mod types;
