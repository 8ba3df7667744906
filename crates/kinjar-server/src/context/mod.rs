//! Request context shared across handlers and services.
//!
//! Every request is resolved once into a [`RequestContext`]: host -> tenant,
//! bearer session -> user, and both together -> [`kinjar_core::Viewer`].

pub mod tenant;

pub use tenant::{bearer_token, resolve_context, RequestContext};
