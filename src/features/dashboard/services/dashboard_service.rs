use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::dashboard::dtos::{DashboardSummaryDto, LineOutputDto, MetricDto};
use crate::features::reports::models::ProductionLine;
use crate::features::sessions::services::SessionService;

/// Today's output per line: (line, units, change vs. yesterday in %)
const LINE_OUTPUT: [(ProductionLine, i64, f64); 3] = [
    (ProductionLine::Line1, 1_200, 5.0),
    (ProductionLine::Line2, 980, -2.0),
    (ProductionLine::Line3, 1_150, 3.0),
];

/// Defect rate in %, change in percentage points
const DEFECT_RATE: (f64, f64) = (1.8, -0.3);

/// Equipment utilization in %, change in percentage points
const EQUIPMENT_UTILIZATION: (f64, f64) = (92.0, 1.0);

/// Share of today's production target already reached
const TARGET_PROGRESS: f64 = 0.75;

/// Service for the production dashboard.
///
/// Production figures are fixed; only the per-session report count is live.
pub struct DashboardService {
    session_service: Arc<SessionService>,
}

impl DashboardService {
    pub fn new(session_service: Arc<SessionService>) -> Self {
        Self { session_service }
    }

    pub async fn get_summary(&self, session_id: Option<Uuid>) -> Result<DashboardSummaryDto> {
        let session_report_count = match session_id {
            Some(id) => Some(self.session_service.report_count(id).await? as i64),
            None => None,
        };

        let lines = LINE_OUTPUT
            .iter()
            .map(|&(line, output_units, delta_percent)| LineOutputDto {
                line,
                output_units,
                delta_percent,
            })
            .collect();

        Ok(DashboardSummaryDto {
            lines,
            defect_rate: MetricDto {
                value: DEFECT_RATE.0,
                delta: DEFECT_RATE.1,
                unit: "%".to_string(),
            },
            equipment_utilization: MetricDto {
                value: EQUIPMENT_UTILIZATION.0,
                delta: EQUIPMENT_UTILIZATION.1,
                unit: "%".to_string(),
            },
            target_progress: TARGET_PROGRESS,
            session_report_count,
        })
    }
}
