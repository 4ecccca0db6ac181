mod report_dto;

pub use report_dto::{is_image_type_allowed, ReportOptionsDto, ReportResponseDto, SubmitReportDto};
