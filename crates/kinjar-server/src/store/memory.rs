//! In-memory [`Store`] backed by `DashMap`.
//!
//! Uniqueness checks go through the `entry` API so they are atomic with the
//! insert. Lock order when several maps are touched:
//! `signups` -> `tenants` -> `emails` -> `users` -> `memberships`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use kinjar_core::access::normalize_email;
use kinjar_core::error::{KinjarError, Result};
use kinjar_core::members::ensure_owner_remains;
use kinjar_core::model::{CreateTenant, GlobalRole, MemberRole, Membership, Post, Tenant, User};
use kinjar_core::signup::{Decider, Decision, SignupRequest, SignupStatus};

use super::{ProvisionedFamily, Store};

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    emails: DashMap<String, Uuid>,
    sessions: DashMap<String, Uuid>,
    /// slug -> tenant
    tenants: DashMap<String, Tenant>,
    /// tenant -> (user -> membership)
    memberships: DashMap<Uuid, HashMap<Uuid, Membership>>,
    /// tenant -> posts
    posts: DashMap<Uuid, Vec<Post>>,
    signups: DashMap<Uuid, SignupRequest>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with an explicit global role (seeding / tests).
    pub fn seed_user(&self, email: &str, name: &str, global_role: GlobalRole) -> User {
        let email = normalize_email(email);
        match self.emails.entry(email.clone()) {
            Entry::Occupied(e) => {
                let id = *e.get();
                if let Some(mut u) = self.users.get_mut(&id) {
                    u.global_role = global_role;
                    return u.clone();
                }
                let user = User { id, email, name: name.to_string(), global_role };
                self.users.insert(id, user.clone());
                user
            }
            Entry::Vacant(e) => {
                let user = User {
                    id: Uuid::new_v4(),
                    email,
                    name: name.to_string(),
                    global_role,
                };
                e.insert(user.id);
                self.users.insert(user.id, user.clone());
                user
            }
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_or_create_user(&self, email: &str, name: &str) -> Result<User> {
        self.find_or_create(email, name)
    }

    async fn session_user(&self, token: &str) -> Result<Option<Uuid>> {
        Ok(self.sessions.get(token).map(|id| *id))
    }

    async fn insert_session(&self, token: &str, user_id: Uuid) -> Result<()> {
        if !self.users.contains_key(&user_id) {
            return Err(KinjarError::NotFound(format!("user {user_id}")));
        }
        self.sessions.insert(token.to_string(), user_id);
        Ok(())
    }

    async fn tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>> {
        Ok(self.tenants.get(slug).map(|t| t.clone()))
    }

    async fn provision_tenant(&self, input: CreateTenant, owner_id: Uuid) -> Result<Tenant> {
        if !self.users.contains_key(&owner_id) {
            return Err(KinjarError::NotFound(format!("user {owner_id}")));
        }
        match self.tenants.entry(input.slug.clone()) {
            Entry::Occupied(_) => Err(slug_taken(&input.slug)),
            Entry::Vacant(e) => {
                let tenant = self.insert_family(input, owner_id);
                e.insert(tenant.clone());
                Ok(tenant)
            }
        }
    }

    async fn membership(&self, tenant_id: Uuid, user_id: Uuid) -> Result<Option<Membership>> {
        Ok(self
            .memberships
            .get(&tenant_id)
            .and_then(|m| m.get(&user_id).cloned()))
    }

    async fn members(&self, tenant_id: Uuid) -> Result<Vec<Membership>> {
        let mut out: Vec<Membership> = self
            .memberships
            .get(&tenant_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        out.sort_by_key(|m| m.created_at);
        Ok(out)
    }

    async fn add_member(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<Membership> {
        let mut members = self.memberships.entry(tenant_id).or_default();
        if members.contains_key(&user_id) {
            return Err(KinjarError::Conflict(format!(
                "user {user_id} is already a member"
            )));
        }
        let m = Membership {
            user_id,
            tenant_id,
            role,
            created_at: Utc::now(),
        };
        members.insert(user_id, m.clone());
        Ok(m)
    }

    async fn set_member_role(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<Membership> {
        let mut members = self
            .memberships
            .get_mut(&tenant_id)
            .ok_or_else(|| KinjarError::NotFound(format!("member {user_id}")))?;

        let current = members
            .get(&user_id)
            .map(|m| m.role)
            .ok_or_else(|| KinjarError::NotFound(format!("member {user_id}")))?;

        if current == MemberRole::Owner && role != MemberRole::Owner {
            let owners = members
                .values()
                .filter(|m| m.role == MemberRole::Owner)
                .count();
            ensure_owner_remains(owners - 1)?;
        }

        let m = members
            .get_mut(&user_id)
            .ok_or_else(|| KinjarError::NotFound(format!("member {user_id}")))?;
        m.role = role;
        Ok(m.clone())
    }

    async fn insert_post(&self, post: Post) -> Result<Post> {
        self.posts
            .entry(post.tenant_id)
            .or_default()
            .push(post.clone());
        Ok(post)
    }

    async fn post(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Post>> {
        Ok(self
            .posts
            .get(&tenant_id)
            .and_then(|ps| ps.iter().find(|p| p.id == id).cloned()))
    }

    async fn posts(&self, tenant_id: Uuid) -> Result<Vec<Post>> {
        let mut out = self
            .posts
            .get(&tenant_id)
            .map(|ps| ps.clone())
            .unwrap_or_default();
        out.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(out)
    }

    async fn delete_post(&self, tenant_id: Uuid, id: Uuid) -> Result<()> {
        let mut ps = self
            .posts
            .get_mut(&tenant_id)
            .ok_or_else(|| KinjarError::NotFound(format!("post {id}")))?;
        let before = ps.len();
        ps.retain(|p| p.id != id);
        if ps.len() == before {
            return Err(KinjarError::NotFound(format!("post {id}")));
        }
        Ok(())
    }

    async fn insert_signup(&self, req: SignupRequest) -> Result<SignupRequest> {
        match self.signups.entry(req.id) {
            Entry::Occupied(_) => Err(KinjarError::Conflict(format!(
                "signup request {} already exists",
                req.id
            ))),
            Entry::Vacant(e) => {
                e.insert(req.clone());
                Ok(req)
            }
        }
    }

    async fn signup(&self, id: Uuid) -> Result<Option<SignupRequest>> {
        Ok(self.signups.get(&id).map(|r| r.clone()))
    }

    async fn signups(&self, status: Option<SignupStatus>) -> Result<Vec<SignupRequest>> {
        let mut out: Vec<SignupRequest> = self
            .signups
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .map(|r| r.clone())
            .collect();
        out.sort_by_key(|r| r.created_at);
        Ok(out)
    }

    async fn decide_signup(&self, decided: SignupRequest) -> Result<SignupRequest> {
        let mut slot = self
            .signups
            .get_mut(&decided.id)
            .ok_or_else(|| KinjarError::NotFound(format!("signup request {}", decided.id)))?;
        if slot.status.is_terminal() {
            return Err(KinjarError::InvalidState(format!(
                "signup request {} is already {}",
                decided.id,
                slot.status.as_str()
            )));
        }
        *slot = decided.clone();
        Ok(decided)
    }

    async fn approve_signup(
        &self,
        id: Uuid,
        decider: &Decider,
        now: DateTime<Utc>,
    ) -> Result<ProvisionedFamily> {
        // Held until the decision is written: a concurrent reject waits here.
        let mut slot = self
            .signups
            .get_mut(&id)
            .ok_or_else(|| KinjarError::NotFound(format!("signup request {id}")))?;
        slot.check_transition(decider)?;

        let slug = slot.desired_slug.clone();
        let Entry::Vacant(vacant) = self.tenants.entry(slug.clone()) else {
            return Err(slug_taken(&slug));
        };

        let owner = self.find_or_create(&slot.email, &slot.name)?;
        let tenant = self.insert_family(
            CreateTenant {
                name: slot.family_name.clone(),
                slug,
            },
            owner.id,
        );
        vacant.insert(tenant.clone());

        slot.apply(decider, Decision::Approve { tenant_id: tenant.id }, now)?;
        Ok(ProvisionedFamily {
            request: slot.clone(),
            tenant,
            owner,
        })
    }
}

impl MemoryStore {
    fn find_or_create(&self, email: &str, name: &str) -> Result<User> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(KinjarError::BadRequest("email must not be empty".into()));
        }
        match self.emails.entry(email.clone()) {
            Entry::Occupied(e) => {
                let id = *e.get();
                self.users.get(&id).map(|u| u.clone()).ok_or_else(|| {
                    KinjarError::Internal(format!("email index points at missing user {id}"))
                })
            }
            Entry::Vacant(e) => {
                let user = User {
                    id: Uuid::new_v4(),
                    email,
                    name: name.trim().to_string(),
                    global_role: GlobalRole::User,
                };
                e.insert(user.id);
                self.users.insert(user.id, user.clone());
                tracing::debug!(user = %user.id, "user created");
                Ok(user)
            }
        }
    }

    /// New tenant plus its OWNER membership. The caller holds the vacant
    /// `tenants` slot for the slug.
    fn insert_family(&self, input: CreateTenant, owner_id: Uuid) -> Tenant {
        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: input.name,
            slug: input.slug,
            created_at: now,
        };
        let owner = Membership {
            user_id: owner_id,
            tenant_id: tenant.id,
            role: MemberRole::Owner,
            created_at: now,
        };
        self.memberships
            .insert(tenant.id, HashMap::from([(owner_id, owner)]));
        tenant
    }
}

fn slug_taken(slug: &str) -> KinjarError {
    KinjarError::Conflict(format!("slug already exists: {slug}"))
}
