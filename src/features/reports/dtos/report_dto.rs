use base64::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{IssueType, ProductionLine, Report};
use crate::shared::constants::ALLOWED_IMAGE_TYPES;

/// Submit report request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmitReportDto {
    /// Production line label
    #[schema(example = "1번 라인")]
    pub line: String,
    /// Issue type label
    #[schema(example = "기타")]
    pub issue_type: String,
    /// Free-text description (required, must not be blank)
    #[schema(example = "벨트 소음 발생")]
    pub details: String,
    /// Optional photo of the issue
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: Option<String>,
}

/// Response DTO for a submitted report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    /// Submission time, `YYYY-MM-DD HH:MM:SS`
    #[schema(example = "2024-05-01 08:30:00")]
    pub timestamp: String,
    pub line: ProductionLine,
    pub issue_type: IssueType,
    pub details: String,
    /// Base64-encoded image bytes, if one was attached
    pub image: Option<String>,
    pub image_content_type: Option<String>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        let timestamp = r.timestamp();
        let (image, image_content_type) = match r.image {
            Some(img) => (
                Some(BASE64_STANDARD.encode(&img.data)),
                Some(img.content_type),
            ),
            None => (None, None),
        };

        Self {
            timestamp,
            line: r.line,
            issue_type: r.issue_type,
            details: r.details,
            image,
            image_content_type,
        }
    }
}

/// Choices offered by the report form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportOptionsDto {
    pub lines: Vec<ProductionLine>,
    pub issue_types: Vec<IssueType>,
}

/// Check if an image MIME type is allowed
pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportImage;
    use chrono::NaiveDate;

    #[test]
    fn test_response_encodes_image_as_base64() {
        let report = Report {
            submitted_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            line: ProductionLine::Line3,
            issue_type: IssueType::MaterialShortage,
            details: "원료 입고 지연".to_string(),
            image: Some(ReportImage {
                content_type: "image/png".to_string(),
                data: vec![0x89, b'P', b'N', b'G'],
            }),
        };

        let dto = ReportResponseDto::from(report);
        assert_eq!(dto.timestamp, "2024-05-01 08:30:00");
        assert_eq!(dto.image.as_deref(), Some("iVBORw=="));
        assert_eq!(dto.image_content_type.as_deref(), Some("image/png"));

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["line"], "3번 라인");
        assert_eq!(json["issue_type"], "원료 부족");
    }

    #[test]
    fn test_image_type_allow_list() {
        assert!(is_image_type_allowed("image/jpeg"));
        assert!(is_image_type_allowed("image/webp"));
        assert!(!is_image_type_allowed("application/pdf"));
        assert!(!is_image_type_allowed("text/plain"));
    }
}
