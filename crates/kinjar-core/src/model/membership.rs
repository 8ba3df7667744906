use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::MemberRole;

/// A user's role within one tenant. Unique per `(user_id, tenant_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
}
