use crate::modules::reports::core::buckets::DEFAULT_LIMIT;
use crate::modules::reports::core::report::ReportKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub limit: i64,
    pub project: String,
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self {
            kind: ReportKind::Overview,
            limit: DEFAULT_LIMIT,
            project: String::new(),
        }
    }
}

impl ReportRequest {
    /// Build a request from raw query values.
    ///
    /// A missing or unknown type means overview. A limit that is not an integer
    /// falls back to the default, and a negative one is read as 0 (today only).
    pub fn parse(kind: Option<&str>, limit: Option<&str>, project: Option<&str>) -> Self {
        let kind = kind
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(ReportKind::Overview);
        let limit = limit
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_LIMIT)
            .max(0);

        Self {
            kind,
            limit,
            project: project.unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod report_request_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_default_to_an_unfiltered_overview() {
        assert_eq!(ReportRequest::parse(None, None, None), ReportRequest::default());
    }

    #[rstest]
    #[case(Some("daily"), ReportKind::Daily)]
    #[case(Some("weekly"), ReportKind::Weekly)]
    #[case(Some("monthly"), ReportKind::Monthly)]
    #[case(Some(""), ReportKind::Overview)]
    #[case(Some("yearly"), ReportKind::Overview)]
    #[case(Some("Daily"), ReportKind::Overview)]
    fn it_should_parse_the_report_type(#[case] raw: Option<&str>, #[case] expected: ReportKind) {
        assert_eq!(ReportRequest::parse(raw, None, None).kind, expected);
    }

    #[rstest]
    #[case(Some("7"), 7)]
    #[case(Some("seven"), DEFAULT_LIMIT)]
    #[case(Some("2.5"), DEFAULT_LIMIT)]
    #[case(None, DEFAULT_LIMIT)]
    fn it_should_fall_back_to_the_default_limit(#[case] raw: Option<&str>, #[case] expected: i64) {
        assert_eq!(ReportRequest::parse(Some("daily"), raw, None).limit, expected);
    }

    #[rstest]
    #[case("0", 0)]
    #[case("-3", 0)]
    fn it_should_read_non_positive_limits_as_today_only(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(ReportRequest::parse(Some("daily"), Some(raw), None).limit, expected);
    }

    #[rstest]
    fn it_should_keep_the_project_filter_verbatim() {
        let request = ReportRequest::parse(None, None, Some("Writ"));
        assert_eq!(request.project, "Writ");
    }
}
