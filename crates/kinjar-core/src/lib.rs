//! Kinjar core: tenant resolution, post visibility, and the signup workflow.
//!
//! This crate holds the domain model and the request-scoped policies shared by
//! the server and by tests. It intentionally carries no transport or runtime
//! dependencies: every policy here is a pure function over already-fetched
//! records.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `KinjarError`/`Result`; the resolver and the
//! visibility filter are total and never fail.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod access;
pub mod error;
pub mod host;
pub mod members;
pub mod model;
pub mod signup;
pub mod slug;
pub mod visibility;

/// Shared result type.
pub use error::{KinjarError, Result};
pub use host::{resolve_tenant, HostResolver, TenantHost};
pub use visibility::{filter_visible, Viewer};
