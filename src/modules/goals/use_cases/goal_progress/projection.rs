use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::modules::goals::core::goal::{Goal, GoalAchievement};

/// A goal as listed with its current streak and today's progress.
/// Progress fields are absent when no achievement row exists for today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgressView {
    pub id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub target_minutes: i64,
    pub start_date: NaiveDateTime,
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today_achieved: Option<bool>,
}

impl GoalProgressView {
    pub fn new(goal: Goal, streak: u32, today: Option<&GoalAchievement>) -> Self {
        Self {
            today_progress: today.map(|a| a.minutes_achieved),
            today_achieved: today.map(|a| a.is_met(goal.target_minutes)),
            id: goal.id,
            project_id: goal.project_id,
            project_name: goal.project_name,
            target_minutes: goal.target_minutes,
            start_date: goal.start_date,
            streak,
        }
    }

    /// Same view with missing progress reported as zero minutes, not achieved.
    pub fn with_defaults(mut self) -> Self {
        self.today_progress = Some(self.today_progress.unwrap_or(0.0));
        self.today_achieved = Some(self.today_achieved.unwrap_or(false));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeDashboardView {
    pub goals: Vec<GoalProgressView>,
    pub date: String,
}
