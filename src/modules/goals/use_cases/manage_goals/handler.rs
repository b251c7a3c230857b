// Goal commands: add a daily target to a project, delete a goal.

use std::sync::Arc;
use tracing::info;

use crate::modules::goals::core::goal::decide_target;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::{GoalStore, ProjectStore};

pub struct ManageGoalsHandler {
    projects: Arc<dyn ProjectStore>,
    goals: Arc<dyn GoalStore>,
    clock: Arc<dyn Clock>,
}

impl ManageGoalsHandler {
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        goals: Arc<dyn GoalStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            projects,
            goals,
            clock,
        }
    }

    pub async fn add_goal(
        &self,
        project_id: i64,
        target_minutes: i64,
    ) -> Result<i64, ApplicationError> {
        let target_minutes =
            decide_target(target_minutes).map_err(|e| ApplicationError::validation(e.to_string()))?;
        if self.projects.find_project(project_id).await?.is_none() {
            return Err(ApplicationError::not_found("Project not found"));
        }

        let goal_id = self
            .goals
            .insert_goal(project_id, target_minutes, self.clock.now())
            .await?;
        info!(goal_id, project_id, target_minutes, "goal added");
        Ok(goal_id)
    }

    pub async fn delete_goal(&self, goal_id: i64) -> Result<(), ApplicationError> {
        if !self.goals.delete_goal(goal_id).await? {
            return Err(ApplicationError::not_found("Goal not found"));
        }
        info!(goal_id, "goal deleted");
        Ok(())
    }
}
