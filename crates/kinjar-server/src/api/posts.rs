use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use kinjar_core::model::{CreatePost, Post};

use crate::app_state::AppState;
use crate::context::RequestContext;
use crate::services::PostService;

use super::error::ApiResult;

pub async fn list_posts(
    State(app): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Json<Vec<Post>>> {
    let posts = PostService::new(&app).list(&ctx, Utc::now()).await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(app): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Post>> {
    let post = PostService::new(&app).get(&ctx, id, Utc::now()).await?;
    Ok(Json(post))
}

pub async fn create_post(
    State(app): State<AppState>,
    ctx: RequestContext,
    Json(input): Json<CreatePost>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = PostService::new(&app).create(&ctx, input, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn delete_post(
    State(app): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    PostService::new(&app).delete(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
