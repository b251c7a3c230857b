// Timer activity queries.
//
// Purpose
// - Show what was tracked today and over the last week, running timers included.
//
// Boundaries
// - Reads intervals only. Open timers are measured up to the clock's now and never persisted.

use std::sync::Arc;

use chrono::Days;

use crate::modules::reports::core::activity::{DayActivity, ProjectActivity, by_day, by_project};
use crate::modules::timers::core::interval::LoggedInterval;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::ReportQueries;

/// Days before today covered by the weekly activity view.
pub const LAST_DAYS: u64 = 7;
/// Most completed timers listed for today.
pub const RECENT_LIMIT: usize = 50;

pub struct TimerActivityHandler {
    queries: Arc<dyn ReportQueries>,
    clock: Arc<dyn Clock>,
}

impl TimerActivityHandler {
    pub fn new(queries: Arc<dyn ReportQueries>, clock: Arc<dyn Clock>) -> Self {
        Self { queries, clock }
    }

    /// Today's timers per project, running ones included.
    pub async fn today_timers(&self) -> Result<Vec<ProjectActivity>, ApplicationError> {
        let intervals = self.started_today().await?;
        let today: Vec<&LoggedInterval> = intervals.iter().collect();
        Ok(by_project(&today, self.clock.now()))
    }

    /// Today's completed timers, newest first, grouped by day and project.
    pub async fn recent_timers(&self) -> Result<Vec<DayActivity>, ApplicationError> {
        let completed: Vec<LoggedInterval> = self
            .started_today()
            .await?
            .into_iter()
            .filter(|interval| !interval.is_open())
            .take(RECENT_LIMIT)
            .collect();
        Ok(by_day(&completed, self.clock.now()))
    }

    /// Every timer of the last week, one bucket per day, newest first.
    pub async fn last_days(&self) -> Result<Vec<DayActivity>, ApplicationError> {
        let today = self.clock.today();
        let since = today.checked_sub_days(Days::new(LAST_DAYS)).unwrap_or(today);
        let intervals = self.queries.intervals_since(since).await?;
        Ok(by_day(&intervals, self.clock.now()))
    }

    async fn started_today(&self) -> Result<Vec<LoggedInterval>, ApplicationError> {
        let today = self.clock.today();
        Ok(self
            .queries
            .intervals_since(today)
            .await?
            .into_iter()
            .filter(|interval| interval.start_day() == today)
            .collect())
    }
}
