use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use kinjar_core::error::{ClientCode, KinjarError};

use crate::app_state::AppState;

/// HTTP wrapper around [`KinjarError`].
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub KinjarError);

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ClientCode::Unauthorized => StatusCode::FORBIDDEN,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::Conflict => StatusCode::CONFLICT,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let msg = match &self.0 {
            KinjarError::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        let mut resp = (
            status_for(code),
            Json(json!({ "code": code.as_str(), "msg": msg })),
        )
            .into_response();
        resp.extensions_mut().insert(code);
        resp
    }
}

/// Counts every `{code,msg}` error response by its client code.
pub async fn track_api_errors(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let resp = next.run(req).await;
    if let Some(code) = resp.extensions().get::<ClientCode>() {
        state.metrics().api_errors.inc(&[("code", code.as_str())]);
    }
    resp
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
