// Today's progress of a goal, recomputed from raw intervals.
//
// The result is always a full recomputation: the sum over every interval of the
// project that started on `day`, open intervals measured up to `now`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::modules::timers::core::interval::{TimerInterval, minutes};

pub fn minutes_achieved_on(day: NaiveDate, intervals: &[TimerInterval], now: NaiveDateTime) -> f64 {
    intervals
        .iter()
        .filter(|interval| interval.start_day() == day)
        .map(|interval| minutes(interval.elapsed(now)))
        .sum()
}
