use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppPath;
use crate::features::reports::dtos::{
    is_image_type_allowed, ReportOptionsDto, ReportResponseDto, SubmitReportDto,
};
use crate::features::reports::models::{IssueType, ProductionLine, ReportImage, SubmitReport};
use crate::features::sessions::services::SessionService;
use crate::shared::constants::{ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE};
use crate::shared::types::{ApiResponse, Meta};

/// Body over the route limit is 413, anything else malformed is 400
fn multipart_error(e: MultipartError, what: &str) -> AppError {
    debug!("Failed to read {}: {}", what, e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "Request body too large. Maximum image size is {} MB",
            MAX_IMAGE_SIZE / 1024 / 1024
        ))
    } else {
        AppError::BadRequest(format!("Failed to read {}: {}", what, e))
    }
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| multipart_error(e, &format!("{} field", name)))
}

/// Submit an issue report into a session
///
/// Accepts multipart/form-data with:
/// - `line`: production line label (required)
/// - `issue_type`: issue type label (required)
/// - `details`: free-text description (required, must not be blank)
/// - `image`: optional image file
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/reports",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body(
        content = SubmitReportDto,
        content_type = "multipart/form-data",
        description = "Report form with optional image",
    ),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Missing detail text or invalid form"),
        (status = 404, description = "Session not found"),
        (status = 413, description = "Image too large")
    ),
    tag = "reports"
)]
pub async fn submit_report(
    State(service): State<Arc<SessionService>>,
    AppPath(id): AppPath<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let mut line: Option<ProductionLine> = None;
    let mut issue_type: Option<IssueType> = None;
    let mut details = String::new();
    let mut image: Option<ReportImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart data"))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "line" => {
                let text = read_text_field(field, "line").await?;
                line = Some(text.parse().map_err(AppError::BadRequest)?);
            }
            "issue_type" => {
                let text = read_text_field(field, "issue_type").await?;
                issue_type = Some(text.parse().map_err(AppError::BadRequest)?);
            }
            "details" => {
                details = read_text_field(field, "details").await?;
            }
            "image" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "image data"))?;

                // Browsers send an empty part when no file was picked
                if data.is_empty() {
                    continue;
                }

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::PayloadTooLarge(format!(
                        "Image too large. Maximum size is {} bytes ({} MB)",
                        MAX_IMAGE_SIZE,
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }

                if !is_image_type_allowed(&content_type) {
                    return Err(AppError::BadRequest(format!(
                        "Image type '{}' is not allowed. Allowed types: {}",
                        content_type,
                        ALLOWED_IMAGE_TYPES.join(", ")
                    )));
                }

                image = Some(ReportImage {
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let line = line.ok_or_else(|| AppError::BadRequest("line is required".to_string()))?;
    let issue_type =
        issue_type.ok_or_else(|| AppError::BadRequest("issue_type is required".to_string()))?;

    let report = service
        .submit_report(
            id,
            SubmitReport {
                line,
                issue_type,
                details,
                image,
            },
        )
        .await?;

    let message = format!("Report submitted at {}", report.timestamp());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report.into()),
            Some(message),
            None,
        )),
    ))
}

/// List a session's reports, newest first
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/reports",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Reports, most recent first", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 404, description = "Session not found")
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<SessionService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports: Vec<ReportResponseDto> = service
        .list_reports(id)
        .await?
        .into_iter()
        .map(ReportResponseDto::from)
        .collect();

    let total = reports.len() as i64;
    let message = reports
        .is_empty()
        .then(|| "No reports submitted yet".to_string());

    Ok(Json(ApiResponse::success(
        Some(reports),
        message,
        Some(Meta { total }),
    )))
}

/// Lines and issue types accepted by the report form
#[utoipa::path(
    get,
    path = "/api/reports/options",
    responses(
        (status = 200, description = "Form options", body = ApiResponse<ReportOptionsDto>)
    ),
    tag = "reports"
)]
pub async fn get_options() -> Json<ApiResponse<ReportOptionsDto>> {
    Json(ApiResponse::success(
        Some(ReportOptionsDto {
            lines: ProductionLine::ALL.to_vec(),
            issue_types: IssueType::ALL.to_vec(),
        }),
        None,
        None,
    ))
}
