use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::pickups::dtos::*;
use crate::features::pickups::services::PickupService;
use crate::shared::types::{ApiResponse, Meta};

/// Number of pickups by hour of day
#[utoipa::path(
    get,
    path = "/api/pickups/histogram",
    tag = "pickups",
    params(DatasetQueryParams),
    responses(
        (status = 200, description = "24-bin histogram", body = ApiResponse<HistogramResponseDto>),
        (status = 400, description = "Invalid query"),
        (status = 404, description = "Dataset not configured")
    )
)]
pub async fn get_histogram(
    State(service): State<Arc<PickupService>>,
    AppQuery(params): AppQuery<DatasetQueryParams>,
) -> Result<Json<ApiResponse<HistogramResponseDto>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (rows, bins) = service.histogram(params.nrows).await?;
    Ok(Json(ApiResponse::success(
        Some(HistogramResponseDto {
            rows,
            bins: bins.to_vec(),
        }),
        None,
        None,
    )))
}

/// Every loaded pickup, unfiltered, with the dataset's column names
#[utoipa::path(
    get,
    path = "/api/pickups/raw",
    tag = "pickups",
    params(DatasetQueryParams),
    responses(
        (status = 200, description = "Loaded rows", body = ApiResponse<RawPickupsDto>),
        (status = 400, description = "Invalid query"),
        (status = 404, description = "Dataset not configured")
    )
)]
pub async fn get_raw(
    State(service): State<Arc<PickupService>>,
    AppQuery(params): AppQuery<DatasetQueryParams>,
) -> Result<Json<ApiResponse<RawPickupsDto>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let dataset = service.dataset(params.nrows).await?;
    let rows: Vec<PickupDto> = dataset.rows.iter().cloned().map(PickupDto::from).collect();

    let total = rows.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(RawPickupsDto {
            columns: dataset.columns.clone(),
            rows,
        }),
        None,
        Some(Meta { total }),
    )))
}

/// Pickups within one hour of day
#[utoipa::path(
    get,
    path = "/api/pickups",
    tag = "pickups",
    params(PickupQueryParams),
    responses(
        (status = 200, description = "Pickups at the requested hour", body = ApiResponse<FilteredPickupsDto>),
        (status = 400, description = "Invalid query"),
        (status = 404, description = "Dataset not configured")
    )
)]
pub async fn list_pickups(
    State(service): State<Arc<PickupService>>,
    AppQuery(params): AppQuery<PickupQueryParams>,
) -> Result<Json<ApiResponse<FilteredPickupsDto>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let pickups: Vec<PickupDto> = service
        .filter(params.nrows, params.hour)
        .await?
        .into_iter()
        .map(PickupDto::from)
        .collect();

    let total = pickups.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(FilteredPickupsDto {
            hour: params.hour,
            pickups,
        }),
        None,
        Some(Meta { total }),
    )))
}

/// Drop cached datasets so the next request reloads from disk
#[utoipa::path(
    delete,
    path = "/api/pickups/cache",
    tag = "pickups",
    params(CacheQueryParams),
    responses(
        (status = 200, description = "Cache entries removed", body = ApiResponse<CacheInvalidateResponseDto>),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn invalidate_cache(
    State(service): State<Arc<PickupService>>,
    AppQuery(params): AppQuery<CacheQueryParams>,
) -> Result<Json<ApiResponse<CacheInvalidateResponseDto>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let removed = service.invalidate(params.nrows).await;
    Ok(Json(ApiResponse::success(
        Some(CacheInvalidateResponseDto { removed }),
        None,
        None,
    )))
}
