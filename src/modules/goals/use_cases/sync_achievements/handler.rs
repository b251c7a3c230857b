// Achievement synchronizer.
//
// Purpose
// - Recompute today's minutes for a set of goals and upsert one achievement row per goal.
//
// Responsibilities
// - Resolve the scope to goals, read the project's intervals started today, sum them, upsert.
// - Skip a goal whose read or write fails, with a warning, and keep going.
//
// Boundaries
// - Failing to list the goals of the scope is the only error returned to the caller.
// - No locking: every run is a full recomputation keyed by (goal, day).

use std::sync::Arc;
use tracing::{debug, warn};

use crate::modules::goals::core::goal::{Goal, GoalAchievement};
use crate::modules::goals::core::progress::minutes_achieved_on;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::{GoalStore, IntervalStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncScope {
    AllGoals,
    Project(i64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub refreshed: usize,
    pub skipped: usize,
}

pub struct AchievementSynchronizer {
    goals: Arc<dyn GoalStore>,
    intervals: Arc<dyn IntervalStore>,
    clock: Arc<dyn Clock>,
}

impl AchievementSynchronizer {
    pub fn new(
        goals: Arc<dyn GoalStore>,
        intervals: Arc<dyn IntervalStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            goals,
            intervals,
            clock,
        }
    }

    pub async fn sync_today(&self, scope: SyncScope) -> Result<SyncReport, ApplicationError> {
        let goals = match scope {
            SyncScope::AllGoals => self.goals.list_goals().await?,
            SyncScope::Project(project_id) => self.goals.goals_for_project(project_id).await?,
        };

        let mut report = SyncReport::default();
        for goal in &goals {
            match self.refresh_goal(goal).await {
                Ok(minutes_achieved) => {
                    debug!(
                        goal_id = goal.id,
                        project_id = goal.project_id,
                        minutes_achieved,
                        "goal progress refreshed"
                    );
                    report.refreshed += 1;
                }
                Err(e) => {
                    warn!(
                        goal_id = goal.id,
                        project_id = goal.project_id,
                        error = %e,
                        "skipping goal progress refresh"
                    );
                    report.skipped += 1;
                }
            }
        }
        Ok(report)
    }

    async fn refresh_goal(&self, goal: &Goal) -> Result<f64, StoreError> {
        let now = self.clock.now();
        let today = now.date();
        let intervals = self
            .intervals
            .intervals_started_on(goal.project_id, today)
            .await?;
        let minutes_achieved = minutes_achieved_on(today, &intervals, now);

        self.goals
            .upsert_achievement(&GoalAchievement {
                goal_id: goal.id,
                achievement_date: today,
                minutes_achieved,
            })
            .await?;
        Ok(minutes_achieved)
    }
}
