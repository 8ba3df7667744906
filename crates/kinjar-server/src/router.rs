//! Axum router wiring.
//!
//! Ops endpoints plus the JSON API. Tenant-scoped API routes resolve the
//! family from the `Host` header; admin routes require ROOT. Error responses
//! are counted per client code on the way out.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::api::error::track_api_errors;
use crate::api::{members, posts, signups, tenant};
use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .route("/api/tenant", get(tenant::tenant_info))
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/:id", get(posts::get_post).delete(posts::delete_post))
        .route("/api/members", get(members::list_members).post(members::add_member))
        .route("/api/members/:user_id", patch(members::change_role))
        .route("/api/signups", post(signups::submit_signup))
        .route("/api/admin/signups", get(signups::list_signups))
        .route("/api/admin/signups/:id/approve", post(signups::approve_signup))
        .route("/api/admin/signups/:id/reject", post(signups::reject_signup))
        .layer(middleware::from_fn_with_state(state.clone(), track_api_errors))
        .with_state(state)
}
