use chrono::{Local, NaiveDateTime};

use crate::features::reports::models::{Report, ReportError, SubmitReport};

/// Append-only list of reports owned by a single session.
///
/// Reports are kept oldest first; [`ReportStore::list_reports`] hands them out
/// newest first. Nothing is ever edited, removed or reordered.
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: Vec<Report>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a report stamped with the local wall clock
    pub fn submit(&mut self, input: SubmitReport) -> Result<Report, ReportError> {
        self.submit_at(input, Local::now().naive_local())
    }

    /// Validate and append a report stamped with `now`.
    ///
    /// The stamp never goes below the previous report's, so a clock stepping
    /// backwards cannot break ordering by timestamp.
    pub fn submit_at(
        &mut self,
        input: SubmitReport,
        now: NaiveDateTime,
    ) -> Result<Report, ReportError> {
        if input.details.trim().is_empty() {
            return Err(ReportError::Validation("missing required detail text"));
        }

        let submitted_at = self
            .reports
            .last()
            .map_or(now, |last| now.max(last.submitted_at));

        let report = Report {
            submitted_at,
            line: input.line,
            issue_type: input.issue_type,
            details: input.details,
            image: input.image,
        };

        self.reports.push(report.clone());
        Ok(report)
    }

    /// All reports, most recently submitted first
    pub fn list_reports(&self) -> Vec<Report> {
        self.reports.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{IssueType, ProductionLine, ReportImage};
    use chrono::{Duration, NaiveDate};
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    fn input(details: &str) -> SubmitReport {
        SubmitReport {
            line: ProductionLine::Line1,
            issue_type: IssueType::Other,
            details: details.to_string(),
            image: None,
        }
    }

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let store = ReportStore::new();
        assert!(store.list_reports().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_submit_scenario() {
        let mut store = ReportStore::new();
        let report = store
            .submit(SubmitReport {
                line: ProductionLine::Line1,
                issue_type: IssueType::Other,
                details: "벨트 소음 발생".to_string(),
                image: None,
            })
            .unwrap();

        let listed = store.list_reports();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], report);
        assert_eq!(listed[0].line.label(), "1번 라인");
        assert_eq!(listed[0].issue_type.label(), "기타");
        assert_eq!(listed[0].details, "벨트 소음 발생");
        assert!(listed[0].image.is_none());
    }

    #[test]
    fn test_append_only_keeps_prior_entries_unchanged() {
        let mut store = ReportStore::new();
        let mut submitted = Vec::new();

        for _ in 0..5 {
            let details: String = Sentence(3..8).fake();
            submitted.push(store.submit(input(&details)).unwrap());

            let mut listed = store.list_reports();
            listed.reverse();
            assert_eq!(listed, submitted);
        }

        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_blank_details_rejected_without_side_effects() {
        let mut store = ReportStore::new();
        store.submit(input("first")).unwrap();

        for details in ["", "   ", "\t\n"] {
            let err = store.submit(input(details)).unwrap_err();
            assert_eq!(
                err,
                ReportError::Validation("missing required detail text")
            );
        }

        assert_eq!(store.list_reports().len(), 1);
    }

    #[test]
    fn test_listing_is_newest_first() {
        let mut store = ReportStore::new();
        let t = base_time();
        store.submit_at(input("A"), t).unwrap();
        store.submit_at(input("B"), t + Duration::seconds(1)).unwrap();
        store.submit_at(input("C"), t + Duration::seconds(2)).unwrap();

        let details: Vec<String> = store.list_reports().into_iter().map(|r| r.details).collect();
        assert_eq!(details, vec!["C", "B", "A"]);

        // Listing is a projection; the store order is untouched
        let again: Vec<String> = store.list_reports().into_iter().map(|r| r.details).collect();
        assert_eq!(again, details);
    }

    #[test]
    fn test_optional_image() {
        let mut store = ReportStore::new();

        let without = store.submit(input("ok")).unwrap();
        assert!(without.image.is_none());

        let bytes = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec();
        let with = store
            .submit(SubmitReport {
                image: Some(ReportImage {
                    content_type: "image/png".to_string(),
                    data: bytes.clone(),
                }),
                ..input("ok")
            })
            .unwrap();
        assert_eq!(with.image.map(|i| i.data), Some(bytes));
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let mut store = ReportStore::new();
        let t = base_time();

        let first = store.submit_at(input("first"), t).unwrap();
        let second = store
            .submit_at(input("second"), t - Duration::minutes(5))
            .unwrap();

        assert!(second.submitted_at >= first.submitted_at);
        assert!(second.timestamp() >= first.timestamp());
    }

    #[test]
    fn test_wall_clock_submissions_are_monotonic() {
        let mut store = ReportStore::new();
        let a = store.submit(input("a")).unwrap();
        let b = store.submit(input("b")).unwrap();
        assert!(b.timestamp() >= a.timestamp());
    }

    #[test]
    fn test_details_stored_verbatim() {
        let mut store = ReportStore::new();
        let report = store.submit(input("  leading and trailing  ")).unwrap();
        assert_eq!(report.details, "  leading and trailing  ");
    }
}
