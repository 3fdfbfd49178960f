//! Top-level facade crate for appinfo.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use appinfo_core::*;
}

pub mod server {
    pub use appinfo_server::*;
}
