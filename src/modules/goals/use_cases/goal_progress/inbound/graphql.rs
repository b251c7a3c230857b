use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::goals::use_cases::goal_progress::projection::{
    GoalProgressView, HomeDashboardView,
};
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlGoalProgress {
    pub id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub target_minutes: i64,
    pub start_date: String,
    pub streak: u32,
    pub today_progress: Option<f64>,
    pub today_achieved: Option<bool>,
}

impl From<GoalProgressView> for GqlGoalProgress {
    fn from(v: GoalProgressView) -> Self {
        Self {
            id: v.id,
            project_id: v.project_id,
            project_name: v.project_name,
            target_minutes: v.target_minutes,
            start_date: v.start_date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            streak: v.streak,
            today_progress: v.today_progress,
            today_achieved: v.today_achieved,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlHomeDashboard {
    pub goals: Vec<GqlGoalProgress>,
    pub date: String,
}

impl From<HomeDashboardView> for GqlHomeDashboard {
    fn from(v: HomeDashboardView) -> Self {
        Self {
            goals: v.goals.into_iter().map(Into::into).collect(),
            date: v.date,
        }
    }
}

#[derive(Default)]
pub struct GoalsQuery;

#[Object]
impl GoalsQuery {
    async fn goals(&self, context: &Context<'_>) -> GqlResult<Vec<GqlGoalProgress>> {
        let state = context.data_unchecked::<AppState>();
        let goals = state.goal_progress.list_goals_with_progress().await?;
        Ok(goals.into_iter().map(Into::into).collect())
    }

    async fn home_dashboard(&self, context: &Context<'_>) -> GqlResult<GqlHomeDashboard> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.goal_progress.home_dashboard().await?.into())
    }
}
