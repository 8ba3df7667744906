//! Kinjar server library entry.
//!
//! Wires config, request context, services, store, and HTTP handlers into
//! one axum application. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod context;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
pub mod store;
