// Consecutive-day streak of a goal.
//
// Walks backward from `today` one calendar day at a time. A day without an
// achievement row stops the walk exactly like a day below target. If today is
// not met yet there is no active streak.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::modules::goals::core::goal::{GoalAchievement, is_met};

pub fn count_consecutive_days(
    today: NaiveDate,
    target_minutes: i64,
    achievements: &BTreeMap<NaiveDate, f64>,
) -> u32 {
    let mut streak = 0;
    let mut day = Some(today);
    while let Some(current) = day {
        match achievements.get(&current) {
            Some(&minutes) if is_met(minutes, target_minutes) => {
                streak += 1;
                day = current.pred_opt();
            }
            _ => break,
        }
    }
    streak
}

pub fn index_by_day(achievements: Vec<GoalAchievement>) -> BTreeMap<NaiveDate, f64> {
    achievements
        .into_iter()
        .map(|a| (a.achievement_date, a.minutes_achieved))
        .collect()
}
