//! Tenant (family) record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One family's isolated space, addressed as `<slug>.<base_domain>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    /// Unique, lowercase DNS label. Immutable once created.
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to provision a tenant.
#[derive(Debug, Clone)]
pub struct CreateTenant {
    pub name: String,
    pub slug: String,
}
