use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::shared::constants::REPORT_TIMESTAMP_FORMAT;

/// Production line a report is filed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ProductionLine {
    #[serde(rename = "1번 라인")]
    Line1,
    #[serde(rename = "2번 라인")]
    Line2,
    #[serde(rename = "3번 라인")]
    Line3,
}

impl ProductionLine {
    pub const ALL: [ProductionLine; 3] = [
        ProductionLine::Line1,
        ProductionLine::Line2,
        ProductionLine::Line3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProductionLine::Line1 => "1번 라인",
            ProductionLine::Line2 => "2번 라인",
            ProductionLine::Line3 => "3번 라인",
        }
    }
}

/// Kind of problem being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum IssueType {
    /// Simple defect
    #[serde(rename = "단순 불량")]
    Defect,
    /// Equipment failure
    #[serde(rename = "설비 고장")]
    EquipmentFailure,
    /// Raw material shortage
    #[serde(rename = "원료 부족")]
    MaterialShortage,
    #[serde(rename = "기타")]
    Other,
}

impl IssueType {
    pub const ALL: [IssueType; 4] = [
        IssueType::Defect,
        IssueType::EquipmentFailure,
        IssueType::MaterialShortage,
        IssueType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IssueType::Defect => "단순 불량",
            IssueType::EquipmentFailure => "설비 고장",
            IssueType::MaterialShortage => "원료 부족",
            IssueType::Other => "기타",
        }
    }
}

impl std::fmt::Display for ProductionLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductionLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|line| line.label() == s)
            .ok_or_else(|| format!("Unknown production line '{}'", s))
    }
}

impl FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|issue| issue.label() == s)
            .ok_or_else(|| format!("Unknown issue type '{}'", s))
    }
}

/// Image attached to a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportImage {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A submitted quality/incident report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub submitted_at: NaiveDateTime,
    pub line: ProductionLine,
    pub issue_type: IssueType,
    pub details: String,
    pub image: Option<ReportImage>,
}

impl Report {
    /// Submission time as `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        self.submitted_at.format(REPORT_TIMESTAMP_FORMAT).to_string()
    }
}

/// Data for submitting a new report
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub line: ProductionLine,
    pub issue_type: IssueType,
    pub details: String,
    pub image: Option<ReportImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("{0}")]
    Validation(&'static str),
}
