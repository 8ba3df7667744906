use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::context::RequestContext;
use crate::services::members::{AddMember, ChangeRole, MemberView};
use crate::services::MemberService;

use super::error::ApiResult;

pub async fn list_members(
    State(app): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Json<Vec<MemberView>>> {
    Ok(Json(MemberService::new(&app).list(&ctx).await?))
}

pub async fn add_member(
    State(app): State<AppState>,
    ctx: RequestContext,
    Json(input): Json<AddMember>,
) -> ApiResult<(StatusCode, Json<MemberView>)> {
    let m = MemberService::new(&app).add(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(m)))
}

pub async fn change_role(
    State(app): State<AppState>,
    ctx: RequestContext,
    Path(user_id): Path<Uuid>,
    Json(input): Json<ChangeRole>,
) -> ApiResult<Json<MemberView>> {
    Ok(Json(MemberService::new(&app).change_role(&ctx, user_id, input).await?))
}
