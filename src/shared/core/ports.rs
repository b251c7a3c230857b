// Ports define what the core needs from the storage layer, without implementing it.
//
// Purpose
// - Describe the project, interval, goal and report read capabilities as traits.
//
// Boundaries
// - No concrete input or output here. The in-memory and SQLite adapters implement these traits.
// - Every date and date-time is local wall time, exactly as stored.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::modules::goals::core::goal::{Goal, GoalAchievement};
use crate::modules::reports::core::report::TimeRange;
use crate::modules::timers::core::interval::{
    ActiveInterval, CompletedInterval, LoggedInterval, TimerInterval,
};
use crate::modules::timers::core::project::Project;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert_project(&self, name: &str) -> Result<Project, StoreError>;
    async fn find_project(&self, id: i64) -> Result<Option<Project>, StoreError>;
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;
    /// Removes the project with its timers, goals and achievements. Returns false when unknown.
    async fn delete_project(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait IntervalStore: Send + Sync {
    async fn start_interval(
        &self,
        project_id: i64,
        description: &str,
        start_time: NaiveDateTime,
    ) -> Result<TimerInterval, StoreError>;
    async fn find_interval(&self, id: i64) -> Result<Option<TimerInterval>, StoreError>;
    async fn open_intervals(&self) -> Result<Vec<ActiveInterval>, StoreError>;
    /// Sets the end instant only if the interval is still open. Returns whether a row changed.
    async fn close_interval(&self, id: i64, end_time: NaiveDateTime) -> Result<bool, StoreError>;
    async fn update_interval_bounds(
        &self,
        id: i64,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<(), StoreError>;
    async fn delete_interval(&self, id: i64) -> Result<(), StoreError>;
    /// Open and closed intervals of a project whose local start date is `day`.
    async fn intervals_started_on(
        &self,
        project_id: i64,
        day: NaiveDate,
    ) -> Result<Vec<TimerInterval>, StoreError>;
}

#[async_trait]
pub trait GoalStore: Send + Sync {
    async fn insert_goal(
        &self,
        project_id: i64,
        target_minutes: i64,
        start_date: NaiveDateTime,
    ) -> Result<i64, StoreError>;
    /// All goals joined with their project name, newest first.
    async fn list_goals(&self) -> Result<Vec<Goal>, StoreError>;
    async fn goals_for_project(&self, project_id: i64) -> Result<Vec<Goal>, StoreError>;
    /// Removes the goal and its achievements. Returns false when unknown.
    async fn delete_goal(&self, id: i64) -> Result<bool, StoreError>;
    /// Insert or overwrite the row keyed by (goal_id, achievement_date).
    async fn upsert_achievement(&self, achievement: &GoalAchievement) -> Result<(), StoreError>;
    async fn find_achievement(
        &self,
        goal_id: i64,
        day: NaiveDate,
    ) -> Result<Option<GoalAchievement>, StoreError>;
    /// Achievements of a goal dated on or before `day`.
    async fn achievements_until(
        &self,
        goal_id: i64,
        day: NaiveDate,
    ) -> Result<Vec<GoalAchievement>, StoreError>;
}

#[async_trait]
pub trait ReportQueries: Send + Sync {
    /// Closed intervals joined with their project name, optionally limited to
    /// those whose local start date is on or after `since`.
    async fn completed_intervals(
        &self,
        since: Option<NaiveDate>,
    ) -> Result<Vec<CompletedInterval>, StoreError>;
    /// Open and closed intervals joined with their project name, whose local
    /// start date is on or after `since`, newest first.
    async fn intervals_since(&self, since: NaiveDate) -> Result<Vec<LoggedInterval>, StoreError>;
    /// Distinct project names, alphabetical.
    async fn project_names(&self) -> Result<Vec<String>, StoreError>;
    async fn time_range(&self) -> Result<TimeRange, StoreError>;
}
