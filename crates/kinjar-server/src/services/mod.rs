//! Domain services.
//!
//! Each service borrows the store and metrics from [`crate::app_state::AppState`]
//! and applies the core policies to a resolved [`crate::context::RequestContext`].
//! Handlers stay thin: decode, call a service, encode.

pub mod members;
pub mod posts;
pub mod signups;

pub use members::MemberService;
pub use posts::PostService;
pub use signups::SignupService;
