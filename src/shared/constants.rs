/// Timestamp format shown on submitted reports
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// IMAGE ATTACHMENTS
// =============================================================================

/// Allowed MIME types for report images
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum image size in bytes (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

// =============================================================================
// PICKUP DATASET
// =============================================================================

/// Rows loaded when the caller does not ask for a specific amount
pub const DEFAULT_PICKUP_ROWS: usize = 10_000;

/// Hour preselected by the pickup filter
pub const DEFAULT_PICKUP_HOUR: u32 = 17;

/// Column holding the pickup timestamp (after lowercasing)
pub const PICKUP_DATE_COLUMN: &str = "date/time";
