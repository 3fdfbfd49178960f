//! appinfo core: metadata records, uptime accounting, and the info snapshot.
//!
//! This crate owns everything `GET /info` reports without knowing anything
//! about HTTP: the git/build metadata records (and the `.properties` parser
//! that feeds them), the clock abstraction, duration formatting, and the
//! per-request [`InfoResponse`] assembly. The gateway crate wires it to axum.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed metadata
//! surfaces as `AppInfoError` at startup; the request path cannot fail.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod info;
pub mod metadata;
pub mod uptime;

/// Shared result type.
pub use error::{AppInfoError, Result};
pub use info::{InfoEndpoint, InfoResponse};
pub use metadata::{BuildInfo, GitInfo, Properties};
pub use uptime::{format_duration, Clock, ManualClock, SystemClock, Uptime};
