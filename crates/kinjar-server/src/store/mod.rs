//! Persistence seam.
//!
//! The relational database is an external collaborator; the server talks to
//! it only through [`Store`]. Implementations must enforce the same
//! uniqueness rules a schema would: tenant slug, user email, and membership
//! per `(user, tenant)`. [`MemoryStore`] is the in-process implementation.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use kinjar_core::error::Result;
use kinjar_core::model::{CreateTenant, MemberRole, Membership, Post, Tenant, User};
use kinjar_core::signup::{Decider, SignupRequest, SignupStatus};

pub use memory::MemoryStore;

#[async_trait]
pub trait Store: Send + Sync {
    // ---- users / sessions
    async fn user(&self, id: Uuid) -> Result<Option<User>>;
    /// Find the user with `email`, creating a plain user when absent.
    async fn find_or_create_user(&self, email: &str, name: &str) -> Result<User>;
    async fn session_user(&self, token: &str) -> Result<Option<Uuid>>;
    async fn insert_session(&self, token: &str, user_id: Uuid) -> Result<()>;

    // ---- tenants
    async fn tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>>;
    /// Create the tenant and its OWNER membership.
    /// Fails with `Conflict` when the slug is taken.
    async fn provision_tenant(&self, input: CreateTenant, owner_id: Uuid) -> Result<Tenant>;

    // ---- memberships
    async fn membership(&self, tenant_id: Uuid, user_id: Uuid) -> Result<Option<Membership>>;
    async fn members(&self, tenant_id: Uuid) -> Result<Vec<Membership>>;
    /// Fails with `Conflict` when the user already belongs to the tenant.
    async fn add_member(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<Membership>;
    /// Fails with `Conflict` when the change would leave no OWNER.
    async fn set_member_role(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<Membership>;

    // ---- posts
    async fn insert_post(&self, post: Post) -> Result<Post>;
    async fn post(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Post>>;
    /// All posts of a tenant, newest `published_at` first.
    async fn posts(&self, tenant_id: Uuid) -> Result<Vec<Post>>;
    async fn delete_post(&self, tenant_id: Uuid, id: Uuid) -> Result<()>;

    // ---- signup requests
    async fn insert_signup(&self, req: SignupRequest) -> Result<SignupRequest>;
    async fn signup(&self, id: Uuid) -> Result<Option<SignupRequest>>;
    /// Oldest first.
    async fn signups(&self, status: Option<SignupStatus>) -> Result<Vec<SignupRequest>>;
    /// Replace a request only while the stored copy is still `PENDING`.
    async fn decide_signup(&self, decided: SignupRequest) -> Result<SignupRequest>;
    /// Approve a `PENDING` request and provision its family in one step:
    /// owner user (found or created by email), tenant, OWNER membership, and
    /// the `APPROVED` decision. Nothing is written unless all of it succeeds;
    /// a taken slug is `Conflict` and leaves the request `PENDING`.
    async fn approve_signup(
        &self,
        id: Uuid,
        decider: &Decider,
        now: DateTime<Utc>,
    ) -> Result<ProvisionedFamily>;
}

/// Result of a successful approval.
#[derive(Debug, Clone)]
pub struct ProvisionedFamily {
    pub request: SignupRequest,
    pub tenant: Tenant,
    pub owner: User,
}
