// Goal progress read paths.
//
// Responsibilities
// - Refresh today's achievements of every goal before reading them.
// - Attach the streak and today's progress to each goal.
//
// Boundaries
// - A failure of the refresh's goal listing or of any read here fails the whole call.
//   Individual goals the refresh could not update are read as they are stored.

use std::sync::Arc;

use crate::modules::goals::core::goal::Goal;
use crate::modules::goals::core::streak::{count_consecutive_days, index_by_day};
use crate::modules::goals::use_cases::goal_progress::projection::{
    GoalProgressView, HomeDashboardView,
};
use crate::modules::goals::use_cases::sync_achievements::handler::{
    AchievementSynchronizer, SyncScope,
};
use crate::shared::core::clock::{Clock, format_day};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::{GoalStore, StoreError};

pub struct StreakCalculator {
    goals: Arc<dyn GoalStore>,
    clock: Arc<dyn Clock>,
}

impl StreakCalculator {
    pub fn new(goals: Arc<dyn GoalStore>, clock: Arc<dyn Clock>) -> Self {
        Self { goals, clock }
    }

    /// Consecutive days ending today on which `target_minutes` was reached.
    pub async fn streak(&self, goal_id: i64, target_minutes: i64) -> Result<u32, StoreError> {
        let today = self.clock.today();
        let achievements = self.goals.achievements_until(goal_id, today).await?;
        Ok(count_consecutive_days(
            today,
            target_minutes,
            &index_by_day(achievements),
        ))
    }
}

pub struct GoalProgressQueries {
    synchronizer: Arc<AchievementSynchronizer>,
    goals: Arc<dyn GoalStore>,
    streaks: StreakCalculator,
    clock: Arc<dyn Clock>,
}

impl GoalProgressQueries {
    pub fn new(
        synchronizer: Arc<AchievementSynchronizer>,
        goals: Arc<dyn GoalStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            synchronizer,
            streaks: StreakCalculator::new(goals.clone(), clock.clone()),
            goals,
            clock,
        }
    }

    pub async fn list_goals_with_progress(
        &self,
    ) -> Result<Vec<GoalProgressView>, ApplicationError> {
        self.synchronizer.sync_today(SyncScope::AllGoals).await?;
        let goals = self.goals.list_goals().await?;

        let mut views = Vec::with_capacity(goals.len());
        for goal in goals {
            views.push(self.progress_of(goal).await?);
        }
        Ok(views)
    }

    pub async fn home_dashboard(&self) -> Result<HomeDashboardView, ApplicationError> {
        let goals = self
            .list_goals_with_progress()
            .await?
            .into_iter()
            .map(GoalProgressView::with_defaults)
            .collect();

        Ok(HomeDashboardView {
            goals,
            date: format_day(self.clock.today()),
        })
    }

    async fn progress_of(&self, goal: Goal) -> Result<GoalProgressView, StoreError> {
        let streak = self.streaks.streak(goal.id, goal.target_minutes).await?;
        let today = self
            .goals
            .find_achievement(goal.id, self.clock.today())
            .await?;
        Ok(GoalProgressView::new(goal, streak, today.as_ref()))
    }
}

#[cfg(test)]
mod goal_progress_handler_tests {
    use super::*;
    use crate::modules::goals::core::goal::GoalAchievement;
    use crate::shared::core::clock::FixedClock;
    use crate::shared::core::ports::{IntervalStore, ProjectStore};
    use crate::shared::infrastructure::store::in_memory::InMemoryStore;
    use crate::tests::fixtures::{at, days_ago, today};
    use rstest::rstest;

    fn queries(store: Arc<InMemoryStore>) -> GoalProgressQueries {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(at(12, 0)));
        let synchronizer = Arc::new(AchievementSynchronizer::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        ));
        GoalProgressQueries::new(synchronizer, store, clock)
    }

    async fn achieve(store: &InMemoryStore, goal_id: i64, offset: i64, minutes_achieved: f64) {
        store
            .upsert_achievement(&GoalAchievement {
                goal_id,
                achievement_date: days_ago(offset),
                minutes_achieved,
            })
            .await
            .unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_compute_the_streak_from_stored_days() {
        let store = Arc::new(InMemoryStore::new());
        for (offset, minutes) in [(0, 60.0), (1, 75.0), (2, 60.0), (4, 90.0)] {
            achieve(&store, 1, offset, minutes).await;
        }
        let calculator = StreakCalculator::new(store, Arc::new(FixedClock(at(12, 0))));
        assert_eq!(calculator.streak(1, 60).await.unwrap(), 3);
        assert_eq!(calculator.streak(1, 61).await.unwrap(), 0);
        assert_eq!(calculator.streak(2, 60).await.unwrap(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refresh_before_listing_goals() {
        let store = Arc::new(InMemoryStore::new());
        let project = store.insert_project("Writing").await.unwrap();
        let goal_id = store.insert_goal(project.id, 30, at(8, 0)).await.unwrap();
        let interval = store.start_interval(project.id, "", at(9, 0)).await.unwrap();
        store.close_interval(interval.id, at(9, 45)).await.unwrap();
        achieve(&store, goal_id, 1, 30.0).await;

        let views = queries(store).list_goals_with_progress().await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id, goal_id);
        assert_eq!(views[0].project_name, "Writing");
        assert_eq!(views[0].today_progress, Some(45.0));
        assert_eq!(views[0].today_achieved, Some(true));
        assert_eq!(views[0].streak, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_leave_progress_empty_when_the_refresh_skipped_a_goal() {
        let store = Arc::new(InMemoryStore::new());
        let project = store.insert_project("Writing").await.unwrap();
        let goal_id = store.insert_goal(project.id, 30, at(8, 0)).await.unwrap();
        store.poison_goal(goal_id).await;

        let views = queries(store.clone()).list_goals_with_progress().await.unwrap();
        assert_eq!(views[0].today_progress, None);
        assert_eq!(views[0].today_achieved, None);

        let dashboard = queries(store).home_dashboard().await.unwrap();
        assert_eq!(dashboard.date, format_day(today()));
        assert_eq!(dashboard.goals[0].today_progress, Some(0.0));
        assert_eq!(dashboard.goals[0].today_achieved, Some(false));
        assert_eq!(dashboard.goals[0].streak, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_the_store_is_offline() {
        let mut store = InMemoryStore::new();
        store.toggle_offline();
        let result = queries(Arc::new(store)).home_dashboard().await;
        assert!(matches!(result, Err(ApplicationError::Storage(_))));
    }
}
