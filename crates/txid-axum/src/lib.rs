#![doc = include_str!("../README.md")]

pub mod app;
pub mod config;
mod error;
mod layer;
pub mod telemetry;

pub use error::*;
pub use layer::*;
// Re-exported so downstream crates can reach `txid` via `txid_axum::txid`
pub use txid;
