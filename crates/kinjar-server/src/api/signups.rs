use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use kinjar_core::error::KinjarError;
use kinjar_core::signup::{SignupRequest, SignupStatus, SubmitSignup};

use crate::app_state::AppState;
use crate::context::RequestContext;
use crate::services::signups::RejectSignup;
use crate::services::SignupService;

use super::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<SignupStatus>,
}

pub async fn submit_signup(
    State(app): State<AppState>,
    Json(input): Json<SubmitSignup>,
) -> ApiResult<(StatusCode, Json<SignupRequest>)> {
    let req = SignupService::new(&app).submit(input, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(req)))
}

pub async fn list_signups(
    State(app): State<AppState>,
    ctx: RequestContext,
    Query(q): Query<ListQuery>,
) -> ApiResult<Json<Vec<SignupRequest>>> {
    let decider = ctx.decider()?;
    Ok(Json(SignupService::new(&app).list(&decider, q.status).await?))
}

pub async fn approve_signup(
    State(app): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SignupRequest>> {
    let decider = ctx.decider()?;
    let svc = SignupService::new(&app);
    Ok(Json(svc.approve(&decider, id, Utc::now()).await?))
}

pub async fn reject_signup(
    State(app): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> ApiResult<Json<SignupRequest>> {
    let decider = ctx.decider()?;
    let input = reject_body(&body)?;
    let svc = SignupService::new(&app);
    Ok(Json(svc.reject(&decider, id, input, Utc::now()).await?))
}

/// The body is optional; when present it must be a valid `RejectSignup`.
fn reject_body(body: &[u8]) -> Result<RejectSignup, KinjarError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RejectSignup::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| KinjarError::BadRequest(format!("invalid reject body: {e}")))
}
