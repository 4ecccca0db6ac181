use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppPath;
use crate::features::sessions::dtos::{EndSessionResponseDto, SessionResponseDto};
use crate::features::sessions::services::SessionService;
use crate::shared::types::ApiResponse;

/// Start a new session
///
/// The returned id scopes every report operation.
#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 201, description = "Session created", body = ApiResponse<SessionResponseDto>)
    ),
    tag = "sessions"
)]
pub async fn create_session(
    State(service): State<Arc<SessionService>>,
) -> (StatusCode, Json<ApiResponse<SessionResponseDto>>) {
    let session = service.create().await;
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(session), None, None)),
    )
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session info", body = ApiResponse<SessionResponseDto>),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(service): State<Arc<SessionService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<SessionResponseDto>>> {
    let session = service.info(id).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// End a session and discard its reports
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session ended", body = ApiResponse<EndSessionResponseDto>),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn end_session(
    State(service): State<Arc<SessionService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<EndSessionResponseDto>>> {
    service.end(id).await?;
    Ok(Json(ApiResponse::success(
        Some(EndSessionResponseDto { ended: true }),
        Some("Session ended".to_string()),
        None,
    )))
}
