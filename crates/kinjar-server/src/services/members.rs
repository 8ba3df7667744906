use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kinjar_core::error::{KinjarError, Result};
use kinjar_core::members::{check_add, check_role_change};
use kinjar_core::model::{MemberRole, Membership};

use crate::app_state::AppState;
use crate::context::RequestContext;
use crate::store::Store;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddMember {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChangeRole {
    pub role: MemberRole,
}

/// Membership joined with the user's display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: MemberRole,
}

pub struct MemberService {
    store: Arc<dyn Store>,
}

impl MemberService {
    pub fn new(state: &AppState) -> Self {
        Self { store: state.store() }
    }

    /// Members and ROOT only.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<MemberView>> {
        let tenant = ctx.tenant()?;
        ctx.user()?;
        if !ctx.viewer.is_member() && !ctx.viewer.is_root() {
            return Err(KinjarError::Unauthorized("members only".into()));
        }

        let mut out = Vec::new();
        for m in self.store.members(tenant.id).await? {
            out.push(self.view(m).await?);
        }
        Ok(out)
    }

    /// Add (invite) a member by email, creating the user if needed.
    pub async fn add(&self, ctx: &RequestContext, input: AddMember) -> Result<MemberView> {
        let tenant = ctx.tenant()?;
        let actor = ctx.user()?;
        check_add(&ctx.viewer, input.role)?;

        let name = input.name.as_deref().unwrap_or(&input.email);
        let user = self.store.find_or_create_user(&input.email, name).await?;
        let m = self.store.add_member(tenant.id, user.id, input.role).await?;
        tracing::info!(
            tenant = %tenant.slug,
            user = %user.id,
            role = m.role.as_str(),
            by = %actor.id,
            "member added"
        );
        self.view(m).await
    }

    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        input: ChangeRole,
    ) -> Result<MemberView> {
        let tenant = ctx.tenant()?;
        let actor = ctx.user()?;
        let current = self
            .store
            .membership(tenant.id, user_id)
            .await?
            .ok_or_else(|| KinjarError::NotFound(format!("member {user_id}")))?;
        check_role_change(&ctx.viewer, current.role, input.role)?;

        let m = self.store.set_member_role(tenant.id, user_id, input.role).await?;
        tracing::info!(
            tenant = %tenant.slug,
            user = %user_id,
            from = current.role.as_str(),
            to = m.role.as_str(),
            by = %actor.id,
            "member role changed"
        );
        self.view(m).await
    }

    async fn view(&self, m: Membership) -> Result<MemberView> {
        let user = self.store.user(m.user_id).await?.ok_or_else(|| {
            KinjarError::Internal(format!("membership without user {}", m.user_id))
        })?;
        Ok(MemberView {
            user_id: user.id,
            email: user.email,
            name: user.name,
            role: m.role,
        })
    }
}
