// Timer activity breakdowns: every interval, open or closed, grouped by day and project.
//
// Responsibilities
// - Measure open intervals up to "now" and closed ones to their end.
// - Rank projects like the reports do, and list timers newest first.
//
// Boundaries
// - Callers pick the intervals; nothing here filters by date.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::modules::reports::core::aggregate::rank_by_hours;
use crate::modules::timers::core::interval::LoggedInterval;
use crate::shared::core::clock::format_day;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerEntry {
    pub id: i64,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub duration_hours: f64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectActivity {
    pub project_name: String,
    pub total_hours: f64,
    pub timers: Vec<TimerEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: String,
    pub projects: Vec<ProjectActivity>,
    pub total_hours: f64,
}

fn entry(interval: &LoggedInterval, now: NaiveDateTime) -> TimerEntry {
    TimerEntry {
        id: interval.id,
        description: interval.description.clone(),
        start_time: interval.start_time,
        end_time: interval.end_time,
        duration_hours: interval.hours(now),
        is_active: interval.is_open(),
    }
}

/// One row per project, ranked by hours, each with its timers newest first.
pub fn by_project(intervals: &[&LoggedInterval], now: NaiveDateTime) -> Vec<ProjectActivity> {
    let mut grouped: BTreeMap<&str, Vec<TimerEntry>> = BTreeMap::new();
    for interval in intervals {
        grouped
            .entry(interval.project_name.as_str())
            .or_default()
            .push(entry(interval, now));
    }

    let mut projects: Vec<ProjectActivity> = grouped
        .into_iter()
        .map(|(project_name, mut timers)| {
            timers.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
            ProjectActivity {
                project_name: project_name.to_string(),
                total_hours: timers.iter().map(|t| t.duration_hours).sum(),
                timers,
            }
        })
        .collect();
    projects.sort_by(|a, b| {
        rank_by_hours((a.total_hours, &a.project_name), (b.total_hours, &b.project_name))
    });
    projects
}

/// One bucket per local start day, newest first, each broken down by project.
pub fn by_day(intervals: &[LoggedInterval], now: NaiveDateTime) -> Vec<DayActivity> {
    let mut grouped: BTreeMap<_, Vec<&LoggedInterval>> = BTreeMap::new();
    for interval in intervals {
        grouped.entry(interval.start_day()).or_default().push(interval);
    }

    grouped
        .into_iter()
        .rev()
        .map(|(day, day_intervals)| {
            let projects = by_project(&day_intervals, now);
            DayActivity {
                date: format_day(day),
                total_hours: projects.iter().map(|p| p.total_hours).sum(),
                projects,
            }
        })
        .collect()
}
