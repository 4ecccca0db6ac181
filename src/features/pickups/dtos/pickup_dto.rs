use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::pickups::models::Pickup;
use crate::shared::constants::{
    DEFAULT_PICKUP_HOUR, DEFAULT_PICKUP_ROWS, REPORT_TIMESTAMP_FORMAT,
};

fn default_nrows() -> usize {
    DEFAULT_PICKUP_ROWS
}

fn default_hour() -> u32 {
    DEFAULT_PICKUP_HOUR
}

// ============================================================================
// Query
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct DatasetQueryParams {
    /// Number of dataset rows to load (default: 10000)
    #[serde(default = "default_nrows")]
    #[validate(range(min = 1, max = 100000, message = "nrows must be between 1 and 100000"))]
    #[param(minimum = 1, maximum = 100000)]
    pub nrows: usize,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct PickupQueryParams {
    /// Number of dataset rows to load (default: 10000)
    #[serde(default = "default_nrows")]
    #[validate(range(min = 1, max = 100000, message = "nrows must be between 1 and 100000"))]
    #[param(minimum = 1, maximum = 100000)]
    pub nrows: usize,

    /// Hour of day to keep (default: 17)
    #[serde(default = "default_hour")]
    #[validate(range(max = 23, message = "hour must be between 0 and 23"))]
    #[param(minimum = 0, maximum = 23)]
    pub hour: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct CacheQueryParams {
    /// Only drop the dataset cached for this row count
    #[validate(range(min = 1, max = 100000, message = "nrows must be between 1 and 100000"))]
    pub nrows: Option<usize>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PickupDto {
    #[schema(example = "2014-09-01 17:15:00")]
    pub date_time: String,
    pub lat: f64,
    pub lon: f64,
    pub base: Option<String>,
}

impl From<Pickup> for PickupDto {
    fn from(p: Pickup) -> Self {
        Self {
            date_time: p.date_time.format(REPORT_TIMESTAMP_FORMAT).to_string(),
            lat: p.lat,
            lon: p.lon,
            base: p.base,
        }
    }
}

/// Pickups per hour of day
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistogramResponseDto {
    /// Rows actually loaded (may be below the requested count)
    pub rows: usize,
    /// 24 counts, index = hour of day
    pub bins: Vec<u64>,
}

/// Loaded rows as-is, with the lowercased header names
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RawPickupsDto {
    pub columns: Vec<String>,
    pub rows: Vec<PickupDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FilteredPickupsDto {
    pub hour: u32,
    pub pickups: Vec<PickupDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CacheInvalidateResponseDto {
    /// Number of cached datasets dropped
    pub removed: usize,
}
