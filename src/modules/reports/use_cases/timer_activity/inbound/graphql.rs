use async_graphql::{Context, Json, Object, Result as GqlResult};

use crate::modules::reports::core::activity::{DayActivity, ProjectActivity};
use crate::shell::state::AppState;

#[derive(Default)]
pub struct ActivityQuery;

#[Object]
impl ActivityQuery {
    async fn today_timers(&self, context: &Context<'_>) -> GqlResult<Json<Vec<ProjectActivity>>> {
        let state = context.data_unchecked::<AppState>();
        Ok(Json(state.activity.today_timers().await?))
    }

    async fn recent_timers(&self, context: &Context<'_>) -> GqlResult<Json<Vec<DayActivity>>> {
        let state = context.data_unchecked::<AppState>();
        Ok(Json(state.activity.recent_timers().await?))
    }

    /// Same shape as `/api/last-7-days`.
    async fn last_days(&self, context: &Context<'_>) -> GqlResult<Json<Vec<DayActivity>>> {
        let state = context.data_unchecked::<AppState>();
        Ok(Json(state.activity.last_days().await?))
    }
}
