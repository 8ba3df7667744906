//! Family signup requests.
//!
//! `PENDING -> APPROVED | REJECTED`; both targets are terminal. Only a ROOT
//! actor may decide. A new submission is a new request; decided requests are
//! never reopened.
//!
//! Provisioning the tenant and its OWNER membership on approval is done by
//! the caller (the store enforces slug uniqueness); this module only owns the
//! transition rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::normalize_email;
use crate::error::{KinjarError, Result};
use crate::model::GlobalRole;
use crate::slug::validate_slug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignupStatus {
    Pending,
    Approved,
    Rejected,
}

impl SignupStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SignupStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignupStatus::Pending => "PENDING",
            SignupStatus::Approved => "APPROVED",
            SignupStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub family_name: String,
    pub desired_slug: String,
    pub status: SignupStatus,
    /// Optional reason given on rejection.
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decided_by: Option<Uuid>,
    /// Tenant provisioned on approval.
    pub tenant_id: Option<Uuid>,
}

/// Client input for a new signup request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmitSignup {
    pub email: String,
    pub name: String,
    pub family_name: String,
    pub slug: String,
}

/// The actor attempting a decision.
#[derive(Debug, Clone, Copy)]
pub struct Decider {
    pub user_id: Uuid,
    pub global_role: GlobalRole,
}

/// A validated, not yet applied decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve { tenant_id: Uuid },
    Reject { reason: Option<String> },
}

impl Decision {
    pub fn target(&self) -> SignupStatus {
        match self {
            Decision::Approve { .. } => SignupStatus::Approved,
            Decision::Reject { .. } => SignupStatus::Rejected,
        }
    }
}

impl SubmitSignup {
    /// Validate and turn the input into a pending request.
    pub fn into_request(self, now: DateTime<Utc>) -> Result<SignupRequest> {
        let email = normalize_email(&self.email);
        if email.is_empty() || !email.contains('@') {
            return Err(KinjarError::BadRequest("a valid email is required".into()));
        }
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(KinjarError::BadRequest("name must not be empty".into()));
        }
        let family_name = self.family_name.trim().to_string();
        if family_name.is_empty() {
            return Err(KinjarError::BadRequest("familyName must not be empty".into()));
        }
        let desired_slug = validate_slug(&self.slug)?;

        Ok(SignupRequest {
            id: Uuid::new_v4(),
            email,
            name,
            family_name,
            desired_slug,
            status: SignupStatus::Pending,
            reason: None,
            created_at: now,
            decided_at: None,
            decided_by: None,
            tenant_id: None,
        })
    }
}

/// Only ROOT may decide signup requests.
pub fn authorize(decider: &Decider) -> Result<()> {
    if decider.global_role.is_root() {
        Ok(())
    } else {
        Err(KinjarError::Unauthorized(
            "only a root administrator may decide signup requests".into(),
        ))
    }
}

impl SignupRequest {
    /// Check that `decider` may move this request out of `PENDING`.
    pub fn check_transition(&self, decider: &Decider) -> Result<()> {
        authorize(decider)?;
        if self.status.is_terminal() {
            return Err(KinjarError::InvalidState(format!(
                "signup request {} is already {}",
                self.id,
                self.status.as_str()
            )));
        }
        Ok(())
    }

    /// Apply a decision. Fails without mutating when the transition is not allowed.
    pub fn apply(
        &mut self,
        decider: &Decider,
        decision: Decision,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.check_transition(decider)?;
        self.status = decision.target();
        self.decided_at = Some(now);
        self.decided_by = Some(decider.user_id);
        match decision {
            Decision::Approve { tenant_id } => self.tenant_id = Some(tenant_id),
            Decision::Reject { reason } => {
                self.reason = reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
            }
        }
        Ok(())
    }
}
