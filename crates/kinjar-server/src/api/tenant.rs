use axum::Json;
use serde::Serialize;

use kinjar_core::model::{MemberRole, Tenant};
use kinjar_core::TenantHost;

use crate::context::RequestContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantInfo {
    /// `root`, `family`, or `foreign`.
    pub host: &'static str,
    pub slug: Option<String>,
    pub tenant: Option<Tenant>,
    pub role: Option<MemberRole>,
    pub is_root: bool,
}

pub async fn tenant_info(ctx: RequestContext) -> Json<TenantInfo> {
    let host = match &ctx.host {
        Some(TenantHost::Root) => "root",
        Some(TenantHost::Family(_)) => "family",
        None => "foreign",
    };
    Json(TenantInfo {
        host,
        slug: ctx.host.as_ref().and_then(TenantHost::slug).map(str::to_string),
        tenant: ctx.tenant.clone(),
        role: ctx.viewer.membership,
        is_root: ctx.viewer.is_root(),
    })
}
