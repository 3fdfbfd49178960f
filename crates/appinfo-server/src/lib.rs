//! appinfo server library entry.
//!
//! Wires config loading, metadata resolution, and the axum router around
//! `appinfo_core::InfoEndpoint`. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod metadata;
pub mod obs;
pub mod ops;
pub mod router;
