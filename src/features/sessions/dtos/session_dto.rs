use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Response DTO for a session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponseDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Number of reports submitted in this session
    pub report_count: i64,
}

/// Response DTO for ending a session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EndSessionResponseDto {
    pub ended: bool,
}
