use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::AppQuery;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Get the production dashboard summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    params(SummaryQueryParams),
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
    AppQuery(params): AppQuery<SummaryQueryParams>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>, AppError> {
    let summary = service.get_summary(params.session_id).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}
