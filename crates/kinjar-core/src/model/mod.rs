//! Domain records.
//!
//! These are the already-decoded rows the policies operate on. Persistence
//! lives behind the server's store; nothing here performs I/O.

pub mod membership;
pub mod post;
pub mod role;
pub mod tenant;
pub mod user;

pub use membership::Membership;
pub use post::{Audience, CreatePost, Post, PostKind};
pub use role::{GlobalRole, MemberRole};
pub use tenant::{CreateTenant, Tenant};
pub use user::User;
