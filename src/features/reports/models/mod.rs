mod report;

pub use report::{IssueType, ProductionLine, Report, ReportError, ReportImage, SubmitReport};
