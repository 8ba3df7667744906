use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::GlobalRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Stored lowercased; unique across the deployment.
    pub email: String,
    pub name: String,
    /// Persisted flag only. The effective role also consults the root
    /// allowlist, see [`crate::access::RootAllowlist::global_role_for`].
    pub global_role: GlobalRole,
}
