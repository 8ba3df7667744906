//! Signup submission and ROOT approval.
//!
//! Approval provisions the family: owner user (found or created by email),
//! tenant, and OWNER membership. The store does that and the decision in one
//! step, so of two approvals racing for one slug exactly one wins (the other
//! surfaces `Conflict` and its request stays `PENDING`), and an approval
//! racing a rejection either provisions and approves or does neither.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use kinjar_core::error::{KinjarError, Result};
use kinjar_core::signup::{
    authorize, Decider, Decision, SignupRequest, SignupStatus, SubmitSignup,
};
use kinjar_core::HostResolver;

use crate::app_state::AppState;
use crate::obs::KinjarMetrics;
use crate::store::Store;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RejectSignup {
    #[serde(default)]
    pub reason: Option<String>,
}

pub struct SignupService {
    store: Arc<dyn Store>,
    metrics: Arc<KinjarMetrics>,
    resolver: HostResolver,
}

impl SignupService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store(),
            metrics: state.metrics(),
            resolver: state.resolver().clone(),
        }
    }

    pub async fn submit(&self, input: SubmitSignup, now: DateTime<Utc>) -> Result<SignupRequest> {
        let req = input.into_request(now)?;
        if self.resolver.is_reserved(&req.desired_slug) {
            return Err(KinjarError::BadRequest(format!(
                "slug {:?} is reserved",
                req.desired_slug
            )));
        }
        // Early feedback only; approval re-checks atomically.
        if self.store.tenant_by_slug(&req.desired_slug).await?.is_some() {
            return Err(KinjarError::Conflict(format!(
                "slug already exists: {}",
                req.desired_slug
            )));
        }

        let req = self.store.insert_signup(req).await?;
        tracing::info!(signup = %req.id, slug = %req.desired_slug, "signup submitted");
        Ok(req)
    }

    pub async fn list(
        &self,
        decider: &Decider,
        status: Option<SignupStatus>,
    ) -> Result<Vec<SignupRequest>> {
        authorize(decider)?;
        self.store.signups(status).await
    }

    pub async fn approve(
        &self,
        decider: &Decider,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<SignupRequest> {
        authorize(decider)?;
        let family = match self.store.approve_signup(id, decider, now).await {
            Ok(f) => f,
            Err(e @ KinjarError::Conflict(_)) => {
                self.metrics.signup_decisions.inc(&[("decision", "conflict")]);
                tracing::warn!(signup = %id, error = %e, "approval lost slug race");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        self.metrics.signup_decisions.inc(&[("decision", "approved")]);
        tracing::info!(
            signup = %id,
            tenant = %family.tenant.id,
            slug = %family.tenant.slug,
            owner = %family.owner.id,
            by = %decider.user_id,
            "signup approved"
        );
        Ok(family.request)
    }

    pub async fn reject(
        &self,
        decider: &Decider,
        id: Uuid,
        input: RejectSignup,
        now: DateTime<Utc>,
    ) -> Result<SignupRequest> {
        let mut decided = self.pending(decider, id).await?;
        decided.apply(decider, Decision::Reject { reason: input.reason }, now)?;
        let decided = self.store.decide_signup(decided).await?;

        self.metrics.signup_decisions.inc(&[("decision", "rejected")]);
        tracing::info!(signup = %id, by = %decider.user_id, "signup rejected");
        Ok(decided)
    }

    /// Authorize first so non-root callers cannot enumerate request ids.
    async fn pending(&self, decider: &Decider, id: Uuid) -> Result<SignupRequest> {
        authorize(decider)?;
        let req = self
            .store
            .signup(id)
            .await?
            .ok_or_else(|| KinjarError::NotFound(format!("signup request {id}")))?;
        req.check_transition(decider)?;
        Ok(req)
    }
}
