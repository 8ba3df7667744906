//! JSON API handlers.
//!
//! Tenant-scoped routes take the family from the request host; see
//! [`crate::context`]. Errors render as `{"code": ..., "msg": ...}`.

pub mod error;
pub mod members;
pub mod posts;
pub mod signups;
pub mod tenant;

pub use error::ApiError;
