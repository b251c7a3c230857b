// Bucket keys and reporting windows.
//
// Weeks follow ISO 8601 throughout: a week runs Monday to Sunday, and both the
// displayed week number and year are the ISO week and ISO year of that Monday.

use chrono::{Datelike, Days, NaiveDate};

use crate::modules::reports::core::report::ReportKind;

pub const DEFAULT_LIMIT: i64 = 30;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
    pub week_start: NaiveDate,
}

impl WeekKey {
    pub fn containing(day: NaiveDate) -> Self {
        let offset = u64::from(day.weekday().num_days_from_monday());
        Self {
            week_start: day - Days::new(offset),
        }
    }

    pub fn week_end(&self) -> NaiveDate {
        self.week_start + Days::new(6)
    }

    pub fn week_number(&self) -> u32 {
        self.week_start.iso_week().week()
    }

    pub fn year(&self) -> i32 {
        self.week_start.iso_week().year()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn containing(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month as usize).saturating_sub(1) % 12]
    }
}

/// Number of days covered by a report of `kind` with the given `limit`.
/// The overview is unbounded.
pub fn window_days(kind: ReportKind, limit: i64) -> Option<i64> {
    match kind {
        ReportKind::Overview => None,
        ReportKind::Daily => Some(limit),
        ReportKind::Weekly => Some(limit.saturating_mul(7)),
        ReportKind::Monthly => Some(limit.saturating_mul(30)),
    }
}

/// Earliest local start date included in a window of `days` ending `today`.
pub fn window_start(today: NaiveDate, days: i64) -> NaiveDate {
    let days = u64::try_from(days).unwrap_or(0);
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod bucket_key_tests {
    use super::*;
    use rstest::rstest;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(day(2026, 10, 12), day(2026, 10, 12))]
    #[case(day(2026, 10, 17), day(2026, 10, 12))]
    #[case(day(2026, 10, 18), day(2026, 10, 12))]
    #[case(day(2026, 10, 19), day(2026, 10, 19))]
    fn it_should_start_weeks_on_monday(#[case] input: NaiveDate, #[case] expected: NaiveDate) {
        let key = WeekKey::containing(input);
        assert_eq!(key.week_start, expected);
        assert_eq!(key.week_end(), expected + Days::new(6));
    }

    #[rstest]
    fn it_should_use_the_iso_year_across_the_new_year() {
        // Thursday 2026-12-31 belongs to ISO week 53 of 2026.
        let key = WeekKey::containing(day(2026, 12, 31));
        assert_eq!(key.week_start, day(2026, 12, 28));
        assert_eq!(key.week_number(), 53);
        assert_eq!(key.year(), 2026);
        // Sunday 2027-01-03 is still in the same week.
        assert_eq!(WeekKey::containing(day(2027, 1, 3)), key);
    }

    #[rstest]
    fn it_should_roll_into_week_one_of_the_next_iso_year() {
        // Monday 2024-12-30 starts ISO week 1 of 2025.
        let key = WeekKey::containing(day(2025, 1, 1));
        assert_eq!(key.week_start, day(2024, 12, 30));
        assert_eq!(key.week_number(), 1);
        assert_eq!(key.year(), 2025);
    }

    #[rstest]
    #[case(1, "January")]
    #[case(9, "September")]
    #[case(12, "December")]
    fn it_should_name_months(#[case] month: u32, #[case] expected: &str) {
        assert_eq!(MonthKey { year: 2026, month }.name(), expected);
    }

    #[rstest]
    fn it_should_order_month_keys_by_year_then_month() {
        let december = MonthKey::containing(day(2025, 12, 31));
        let january = MonthKey::containing(day(2026, 1, 1));
        assert!(january > december);
    }

    #[rstest]
    #[case(ReportKind::Overview, 30, None)]
    #[case(ReportKind::Daily, 30, Some(30))]
    #[case(ReportKind::Weekly, 4, Some(28))]
    #[case(ReportKind::Monthly, 2, Some(60))]
    fn it_should_size_the_window(
        #[case] kind: ReportKind,
        #[case] limit: i64,
        #[case] expected: Option<i64>,
    ) {
        assert_eq!(window_days(kind, limit), expected);
    }

    #[rstest]
    fn it_should_compute_the_window_start() {
        assert_eq!(window_start(day(2026, 10, 17), 30), day(2026, 9, 17));
        assert_eq!(window_start(day(2026, 10, 17), 0), day(2026, 10, 17));
    }

    #[rstest]
    fn it_should_clamp_enormous_windows() {
        assert_eq!(window_start(day(2026, 10, 17), i64::MAX), NaiveDate::MIN);
    }
}
