use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub target_minutes: i64,
    pub start_date: NaiveDateTime,
}

/// Minutes accumulated by a goal's project on one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAchievement {
    pub goal_id: i64,
    pub achievement_date: NaiveDate,
    pub minutes_achieved: f64,
}

impl GoalAchievement {
    pub fn is_met(&self, target_minutes: i64) -> bool {
        is_met(self.minutes_achieved, target_minutes)
    }
}

pub fn is_met(minutes_achieved: f64, target_minutes: i64) -> bool {
    minutes_achieved >= target_minutes as f64
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GoalError {
    #[error("Target minutes must be greater than 0")]
    NonPositiveTarget,
}

pub fn decide_target(target_minutes: i64) -> Result<i64, GoalError> {
    if target_minutes <= 0 {
        return Err(GoalError::NonPositiveTarget);
    }
    Ok(target_minutes)
}
