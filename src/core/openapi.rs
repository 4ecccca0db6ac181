use utoipa::{Modify, OpenApi};

use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::pickups::{dtos as pickups_dtos, handlers as pickups_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::sessions::{dtos as sessions_dtos, handlers as sessions_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Sessions
        sessions_handlers::create_session,
        sessions_handlers::get_session,
        sessions_handlers::end_session,
        // Reports
        reports_handlers::submit_report,
        reports_handlers::list_reports,
        reports_handlers::get_options,
        // Dashboard
        dashboard_handlers::get_summary,
        // Pickups
        pickups_handlers::get_histogram,
        pickups_handlers::get_raw,
        pickups_handlers::list_pickups,
        pickups_handlers::invalidate_cache,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Sessions
            sessions_dtos::SessionResponseDto,
            sessions_dtos::EndSessionResponseDto,
            ApiResponse<sessions_dtos::SessionResponseDto>,
            ApiResponse<sessions_dtos::EndSessionResponseDto>,
            // Reports
            reports_models::ProductionLine,
            reports_models::IssueType,
            reports_dtos::SubmitReportDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportOptionsDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::ReportOptionsDto>,
            // Dashboard
            dashboard_dtos::LineOutputDto,
            dashboard_dtos::MetricDto,
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            // Pickups
            pickups_dtos::PickupDto,
            pickups_dtos::HistogramResponseDto,
            pickups_dtos::RawPickupsDto,
            pickups_dtos::FilteredPickupsDto,
            pickups_dtos::CacheInvalidateResponseDto,
            ApiResponse<pickups_dtos::HistogramResponseDto>,
            ApiResponse<pickups_dtos::RawPickupsDto>,
            ApiResponse<pickups_dtos::FilteredPickupsDto>,
            ApiResponse<pickups_dtos::CacheInvalidateResponseDto>,
        )
    ),
    tags(
        (name = "sessions", description = "Per-user sessions owning a report list"),
        (name = "reports", description = "Production line issue reports"),
        (name = "Dashboard", description = "Production summary"),
        (name = "pickups", description = "Ride pickup dataset"),
    ),
    info(
        title = "Line Monitor API",
        version = "0.1.0",
        description = "Production line dashboard and issue reports",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
