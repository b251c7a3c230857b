// Timer intervals and the duration arithmetic shared by goal progress and reports.
//
// Responsibilities
// - Express the elapsed time of an interval, using "now" for the end of an open one.
// - Convert durations to minutes and hours with second precision.
// - Validate explicit edits of both bounds.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerInterval {
    pub id: i64,
    pub project_id: i64,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
}

impl TimerInterval {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Elapsed time of the interval. Open intervals run until `now`.
    pub fn elapsed(&self, now: NaiveDateTime) -> TimeDelta {
        span(self.start_time, self.end_time.unwrap_or(now))
    }
}

/// A closed interval joined with its project name, as read by reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedInterval {
    pub project_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl CompletedInterval {
    pub fn start_day(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn hours(&self) -> f64 {
        hours(span(self.start_time, self.end_time))
    }
}

/// Any interval, open or closed, joined with its project name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedInterval {
    pub id: i64,
    pub project_name: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
}

impl LoggedInterval {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Hours so far. Open intervals run until `now`.
    pub fn hours(&self, now: NaiveDateTime) -> f64 {
        hours(span(self.start_time, self.end_time.unwrap_or(now)))
    }
}

/// An open interval as listed to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveInterval {
    pub id: i64,
    pub project: String,
    pub description: String,
    pub start_time: NaiveDateTime,
}

/// Time between `start` and `end`; an end before the start counts as zero.
pub fn span(start: NaiveDateTime, end: NaiveDateTime) -> TimeDelta {
    (end - start).max(TimeDelta::zero())
}

pub fn minutes(span: TimeDelta) -> f64 {
    span.num_seconds() as f64 / 60.0
}

pub fn hours(span: TimeDelta) -> f64 {
    span.num_seconds() as f64 / 3600.0
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Invalid start time format")]
    InvalidStart,

    #[error("Invalid end time format")]
    InvalidEnd,

    #[error("End time must be after start time")]
    EndNotAfterStart,
}

const EDIT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

fn parse_local(value: &str) -> Option<NaiveDateTime> {
    EDIT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
}

/// Parse and validate new bounds for a closed interval.
pub fn decide_bounds(
    start: &str,
    end: &str,
) -> Result<(NaiveDateTime, NaiveDateTime), IntervalError> {
    let start_time = parse_local(start).ok_or(IntervalError::InvalidStart)?;
    let end_time = parse_local(end).ok_or(IntervalError::InvalidEnd)?;
    if end_time <= start_time {
        return Err(IntervalError::EndNotAfterStart);
    }
    Ok((start_time, end_time))
}
