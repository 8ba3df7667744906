//! Top-level facade crate for Kinjar.
//!
//! Re-exports the domain core and the HTTP server library so users can depend on a single crate.

pub mod core {
    pub use kinjar_core::*;
}

pub mod server {
    pub use kinjar_server::*;
}
