// Report read models, serialised exactly as the report endpoint returns them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Overview,
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "overview" => Ok(Self::Overview),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("Unknown report type: {other}")),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Overview => "overview",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTotal {
    pub project_name: String,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHours {
    pub project_name: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    pub date: String,
    pub projects: Vec<ProjectHours>,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    pub week_start: String,
    pub week_end: String,
    pub week_number: u32,
    pub year: i32,
    pub projects: Vec<ProjectHours>,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month: String,
    pub year: i32,
    pub projects: Vec<ProjectHours>,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSummary {
    pub total_projects: usize,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub total_days: usize,
    pub total_hours: f64,
    pub avg_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub total_weeks: usize,
    pub total_hours: f64,
    pub avg_per_week: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub total_months: usize,
    pub total_hours: f64,
    pub avg_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBody<TItem, TSummary> {
    pub data: Vec<TItem>,
    pub total_hours: f64,
    pub summary: TSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Report {
    Overview(ReportBody<ProjectTotal, OverviewSummary>),
    Daily(ReportBody<DailyBucket, DailySummary>),
    Weekly(ReportBody<WeeklyBucket, WeeklySummary>),
    Monthly(ReportBody<MonthlyBucket, MonthlySummary>),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Overview(_) => ReportKind::Overview,
            Self::Daily(_) => ReportKind::Daily,
            Self::Weekly(_) => ReportKind::Weekly,
            Self::Monthly(_) => ReportKind::Monthly,
        }
    }

    pub fn total_hours(&self) -> f64 {
        match self {
            Self::Overview(body) => body.total_hours,
            Self::Daily(body) => body.total_hours,
            Self::Weekly(body) => body.total_hours,
            Self::Monthly(body) => body.total_hours,
        }
    }
}

/// First and last local start date over completed intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

#[cfg(test)]
mod report_model_tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("overview", ReportKind::Overview)]
    #[case("daily", ReportKind::Daily)]
    #[case("weekly", ReportKind::Weekly)]
    #[case("monthly", ReportKind::Monthly)]
    fn it_should_parse_report_kinds(#[case] raw: &str, #[case] expected: ReportKind) {
        assert_eq!(raw.parse::<ReportKind>(), Ok(expected));
        assert_eq!(expected.to_string(), raw);
    }

    #[rstest]
    fn it_should_reject_unknown_kinds() {
        assert!("yearly".parse::<ReportKind>().is_err());
        assert!("Daily".parse::<ReportKind>().is_err());
    }

    #[rstest]
    fn it_should_serialise_with_the_type_tag_inline() {
        let report = Report::Overview(ReportBody {
            data: vec![ProjectTotal {
                project_name: "Writing".into(),
                total_hours: 1.25,
            }],
            total_hours: 1.25,
            summary: OverviewSummary {
                total_projects: 1,
                total_hours: 1.25,
            },
        });
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "type": "overview",
                "data": [{"project_name": "Writing", "total_hours": 1.25}],
                "total_hours": 1.25,
                "summary": {"total_projects": 1, "total_hours": 1.25}
            })
        );
    }

    #[rstest]
    fn it_should_serialise_an_empty_time_range_as_nulls() {
        assert_eq!(
            serde_json::to_value(TimeRange::default()).unwrap(),
            json!({"min_date": null, "max_date": null})
        );
    }
}
