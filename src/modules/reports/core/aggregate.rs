// Pure report aggregation over completed intervals.
//
// Responsibilities
// - Group intervals by bucket key and project, summing hours.
// - Order buckets by key descending, and rows by hours descending then project name.
// - Produce the summary block of each report kind.
//
// Boundaries
// - Window and project filters are applied before aggregation; every interval given here counts.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::modules::reports::core::buckets::{MonthKey, WeekKey};
use crate::modules::reports::core::report::{
    DailyBucket, DailySummary, MonthlyBucket, MonthlySummary, OverviewSummary, ProjectHours,
    ProjectTotal, Report, ReportBody, WeeklyBucket, WeeklySummary,
};
use crate::modules::timers::core::interval::CompletedInterval;
use crate::shared::core::clock::format_day;

/// Case-sensitive substring match; an empty filter matches every project.
pub fn matches_filter(project_name: &str, filter: &str) -> bool {
    filter.is_empty() || project_name.contains(filter)
}

/// Row order shared by every breakdown: hours descending, then project name.
pub fn rank_by_hours(a: (f64, &str), b: (f64, &str)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

struct Bucket<K> {
    key: K,
    projects: Vec<ProjectHours>,
    total_hours: f64,
}

fn sorted_rows(per_project: HashMap<&str, f64>) -> Vec<ProjectHours> {
    let mut rows: Vec<ProjectHours> = per_project
        .into_iter()
        .map(|(project_name, hours)| ProjectHours {
            project_name: project_name.to_string(),
            hours,
        })
        .collect();
    rows.sort_by(|a, b| rank_by_hours((a.hours, &a.project_name), (b.hours, &b.project_name)));
    rows
}

fn group_into_buckets<K, F>(intervals: &[CompletedInterval], key_of: F) -> Vec<Bucket<K>>
where
    K: Copy + Ord + Hash,
    F: Fn(&CompletedInterval) -> K,
{
    let mut grouped: HashMap<K, HashMap<&str, f64>> = HashMap::new();
    for interval in intervals {
        *grouped
            .entry(key_of(interval))
            .or_default()
            .entry(interval.project_name.as_str())
            .or_default() += interval.hours();
    }

    let mut buckets: Vec<Bucket<K>> = grouped
        .into_iter()
        .map(|(key, per_project)| {
            let projects = sorted_rows(per_project);
            let total_hours = projects.iter().map(|row| row.hours).sum();
            Bucket {
                key,
                projects,
                total_hours,
            }
        })
        .collect();
    buckets.sort_by(|a, b| b.key.cmp(&a.key));
    buckets
}

fn grand_total<K>(buckets: &[Bucket<K>]) -> f64 {
    buckets.iter().map(|bucket| bucket.total_hours).sum()
}

fn average(total_hours: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_hours / count as f64
    }
}

pub fn overview(intervals: &[CompletedInterval]) -> Report {
    let mut per_project: HashMap<&str, f64> = HashMap::new();
    for interval in intervals {
        *per_project.entry(interval.project_name.as_str()).or_default() += interval.hours();
    }
    let data: Vec<ProjectTotal> = sorted_rows(per_project)
        .into_iter()
        .map(|row| ProjectTotal {
            project_name: row.project_name,
            total_hours: row.hours,
        })
        .collect();
    let total_hours = data.iter().map(|row| row.total_hours).sum();

    Report::Overview(ReportBody {
        summary: OverviewSummary {
            total_projects: data.len(),
            total_hours,
        },
        data,
        total_hours,
    })
}

pub fn daily(intervals: &[CompletedInterval]) -> Report {
    let buckets = group_into_buckets(intervals, CompletedInterval::start_day);
    let total_hours = grand_total(&buckets);
    let data: Vec<DailyBucket> = buckets
        .into_iter()
        .map(|bucket| DailyBucket {
            date: format_day(bucket.key),
            projects: bucket.projects,
            total_hours: bucket.total_hours,
        })
        .collect();

    Report::Daily(ReportBody {
        summary: DailySummary {
            total_days: data.len(),
            total_hours,
            avg_per_day: average(total_hours, data.len()),
        },
        data,
        total_hours,
    })
}

pub fn weekly(intervals: &[CompletedInterval]) -> Report {
    let buckets = group_into_buckets(intervals, |interval| {
        WeekKey::containing(interval.start_day())
    });
    let total_hours = grand_total(&buckets);
    let data: Vec<WeeklyBucket> = buckets
        .into_iter()
        .map(|bucket| WeeklyBucket {
            week_start: format_day(bucket.key.week_start),
            week_end: format_day(bucket.key.week_end()),
            week_number: bucket.key.week_number(),
            year: bucket.key.year(),
            projects: bucket.projects,
            total_hours: bucket.total_hours,
        })
        .collect();

    Report::Weekly(ReportBody {
        summary: WeeklySummary {
            total_weeks: data.len(),
            total_hours,
            avg_per_week: average(total_hours, data.len()),
        },
        data,
        total_hours,
    })
}

pub fn monthly(intervals: &[CompletedInterval]) -> Report {
    let buckets = group_into_buckets(intervals, |interval| {
        MonthKey::containing(interval.start_day())
    });
    let total_hours = grand_total(&buckets);
    let data: Vec<MonthlyBucket> = buckets
        .into_iter()
        .map(|bucket| MonthlyBucket {
            month: bucket.key.name().to_string(),
            year: bucket.key.year,
            projects: bucket.projects,
            total_hours: bucket.total_hours,
        })
        .collect();

    Report::Monthly(ReportBody {
        summary: MonthlySummary {
            total_months: data.len(),
            total_hours,
            avg_per_month: average(total_hours, data.len()),
        },
        data,
        total_hours,
    })
}
