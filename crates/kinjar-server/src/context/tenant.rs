use async_trait::async_trait;
use axum::extract::{FromRequestParts, Host};
use axum::http::{header, request::Parts, HeaderMap};

use kinjar_core::error::{KinjarError, Result};
use kinjar_core::model::{Tenant, User};
use kinjar_core::signup::Decider;
use kinjar_core::{TenantHost, Viewer};

use crate::api::error::ApiError;
use crate::app_state::AppState;

/// Resolved per-request context (tenant, user, viewer).
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Outcome of host resolution; `None` for foreign hosts.
    pub host: Option<TenantHost>,
    /// The family behind the host, if it exists.
    pub tenant: Option<Tenant>,
    pub user: Option<User>,
    pub viewer: Viewer,
}

impl RequestContext {
    /// Tenant or a client-visible error for hosts without one.
    pub fn tenant(&self) -> Result<&Tenant> {
        if let Some(t) = &self.tenant {
            return Ok(t);
        }
        match &self.host {
            Some(TenantHost::Family(slug)) => {
                Err(KinjarError::NotFound(format!("unknown family: {slug}")))
            }
            _ => Err(KinjarError::NotFound("no family at this host".into())),
        }
    }

    pub fn user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(KinjarError::Unauthenticated)
    }

    pub fn decider(&self) -> Result<Decider> {
        let user = self.user()?;
        Ok(Decider {
            user_id: user.id,
            global_role: self.viewer.global_role.unwrap_or_default(),
        })
    }
}

/// `Authorization: Bearer <token>`; anything else counts as no session.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve host + session into a request context.
///
/// An unknown session token is an error (401); a missing one is anonymous.
pub async fn resolve_context(
    state: &AppState,
    host: &str,
    token: Option<&str>,
) -> Result<RequestContext> {
    let store = state.store();
    let resolved = state.resolver().resolve(host);

    let outcome = match &resolved {
        Some(TenantHost::Root) => "root",
        Some(TenantHost::Family(_)) => "family",
        None => "foreign",
    };
    state.metrics().host_resolutions.inc(&[("outcome", outcome)]);

    let tenant = match resolved.as_ref().and_then(TenantHost::slug) {
        Some(slug) => store.tenant_by_slug(slug).await?,
        None => None,
    };

    let user = match token {
        Some(t) => {
            let id = store
                .session_user(t)
                .await?
                .ok_or(KinjarError::Unauthenticated)?;
            let user = store.user(id).await?.ok_or(KinjarError::Unauthenticated)?;
            Some(user)
        }
        None => None,
    };

    let mut viewer = Viewer::anonymous();
    if let Some(u) = &user {
        viewer.global_role = Some(state.roots().global_role_for(u));
        if let Some(t) = &tenant {
            viewer.membership = store.membership(t.id, u.id).await?.map(|m| m.role);
        }
    }

    tracing::debug!(
        host,
        outcome,
        tenant = tenant.as_ref().map(|t| t.slug.as_str()),
        user = ?user.as_ref().map(|u| u.id),
        "request context resolved"
    );

    Ok(RequestContext { host: resolved, tenant, user, viewer })
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Host(host) = Host::from_request_parts(parts, state)
            .await
            .map_err(|_| KinjarError::BadRequest("missing host".into()))?;
        let token = bearer_token(&parts.headers);
        Ok(resolve_context(state, &host, token).await?)
    }
}
