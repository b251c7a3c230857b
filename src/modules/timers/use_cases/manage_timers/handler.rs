// Timer commands.
//
// Purpose
// - Start, stop, restart, edit and delete timer intervals, and list the running ones.
//
// Responsibilities
// - Enforce a single running interval and only edit or delete closed ones.
// - After a stop or an edit commits, ask the background refresher to update the project's goals.
//
// Boundaries
// - The refresh never blocks or fails the command.

use std::sync::Arc;
use tracing::info;

use crate::modules::timers::core::interval::{ActiveInterval, TimerInterval, decide_bounds};
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::{IntervalStore, ProjectStore};
use crate::shared::infrastructure::background::BackgroundRefresher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    AlreadyStopped,
}

impl StopOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            StopOutcome::Stopped => "Timer stopped",
            StopOutcome::AlreadyStopped => "Timer already stopped",
        }
    }
}

pub struct ManageTimersHandler {
    projects: Arc<dyn ProjectStore>,
    intervals: Arc<dyn IntervalStore>,
    clock: Arc<dyn Clock>,
    refresher: BackgroundRefresher,
}

impl ManageTimersHandler {
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        intervals: Arc<dyn IntervalStore>,
        clock: Arc<dyn Clock>,
        refresher: BackgroundRefresher,
    ) -> Self {
        Self {
            projects,
            intervals,
            clock,
            refresher,
        }
    }

    pub async fn start_timer(
        &self,
        project_id: i64,
        description: &str,
    ) -> Result<i64, ApplicationError> {
        if self.projects.find_project(project_id).await?.is_none() {
            return Err(ApplicationError::not_found("Project not found"));
        }
        self.ensure_none_running().await?;

        let interval = self
            .intervals
            .start_interval(project_id, description, self.clock.now())
            .await?;
        info!(timer_id = interval.id, project_id, "timer started");
        Ok(interval.id)
    }

    pub async fn stop_timer(&self, timer_id: i64) -> Result<StopOutcome, ApplicationError> {
        if timer_id <= 0 {
            return Err(ApplicationError::validation("Invalid timer ID"));
        }
        let interval = self.existing(timer_id).await?;
        if !interval.is_open() {
            return Ok(StopOutcome::AlreadyStopped);
        }
        if !self
            .intervals
            .close_interval(timer_id, self.clock.now())
            .await?
        {
            return Ok(StopOutcome::AlreadyStopped);
        }

        info!(timer_id, project_id = interval.project_id, "timer stopped");
        self.refresher.refresh_project(interval.project_id);
        Ok(StopOutcome::Stopped)
    }

    /// Start a new timer with the project and description of a closed one.
    pub async fn restart_timer(&self, timer_id: i64) -> Result<i64, ApplicationError> {
        let previous = self.existing(timer_id).await?;
        if previous.is_open() {
            return Err(ApplicationError::validation("Timer is already active"));
        }
        self.ensure_none_running().await?;

        let interval = self
            .intervals
            .start_interval(previous.project_id, &previous.description, self.clock.now())
            .await?;
        info!(
            timer_id = interval.id,
            restarted_from = timer_id,
            project_id = interval.project_id,
            "timer restarted"
        );
        Ok(interval.id)
    }

    /// Replace both bounds of a closed interval. Times are local, `YYYY-MM-DDTHH:MM[:SS]`.
    pub async fn edit_timer(
        &self,
        timer_id: i64,
        start: &str,
        end: &str,
    ) -> Result<(), ApplicationError> {
        let (start_time, end_time) =
            decide_bounds(start, end).map_err(|e| ApplicationError::validation(e.to_string()))?;
        let interval = self.existing(timer_id).await?;
        if interval.is_open() {
            return Err(ApplicationError::validation(
                "Cannot edit active timer. Please stop it first.",
            ));
        }

        self.intervals
            .update_interval_bounds(timer_id, start_time, end_time)
            .await?;
        info!(timer_id, project_id = interval.project_id, "timer edited");
        self.refresher.refresh_project(interval.project_id);
        Ok(())
    }

    pub async fn delete_timer(&self, timer_id: i64) -> Result<(), ApplicationError> {
        let interval = self.existing(timer_id).await?;
        if interval.is_open() {
            return Err(ApplicationError::validation(
                "Cannot delete active timer. Please stop it first.",
            ));
        }

        self.intervals.delete_interval(timer_id).await?;
        info!(timer_id, project_id = interval.project_id, "timer deleted");
        Ok(())
    }

    pub async fn active_timers(&self) -> Result<Vec<ActiveInterval>, ApplicationError> {
        Ok(self.intervals.open_intervals().await?)
    }

    async fn ensure_none_running(&self) -> Result<(), ApplicationError> {
        if self.intervals.open_intervals().await?.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::validation(
                "Another timer is already running. Please stop it first.",
            ))
        }
    }

    async fn existing(&self, timer_id: i64) -> Result<TimerInterval, ApplicationError> {
        self.intervals
            .find_interval(timer_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Timer not found"))
    }
}
