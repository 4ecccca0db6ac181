use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::reports::models::ProductionLine;

// ============================================================================
// Query
// ============================================================================

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SummaryQueryParams {
    /// Include this session's report count in the summary
    pub session_id: Option<Uuid>,
}

// ============================================================================
// Summary
// ============================================================================

/// Today's output of one production line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineOutputDto {
    pub line: ProductionLine,
    /// Units produced today
    pub output_units: i64,
    /// Change against yesterday, in percent
    pub delta_percent: f64,
}

/// A single KPI with its change against the previous period
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricDto {
    pub value: f64,
    pub delta: f64,
    #[schema(example = "%")]
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub lines: Vec<LineOutputDto>,
    pub defect_rate: MetricDto,
    pub equipment_utilization: MetricDto,
    /// Share of the daily production target reached, 0.0 to 1.0
    pub target_progress: f64,
    /// Reports filed in the requested session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_report_count: Option<i64>,
}
