use async_graphql::{Context, Json, Object, Result as GqlResult, SimpleObject};

use crate::modules::reports::core::report::{Report, TimeRange};
use crate::modules::reports::use_cases::build_report::query::ReportRequest;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlTimeRange {
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

impl From<TimeRange> for GqlTimeRange {
    fn from(v: TimeRange) -> Self {
        Self {
            min_date: v.min_date,
            max_date: v.max_date,
        }
    }
}

#[derive(Default)]
pub struct ReportsQuery;

#[Object]
impl ReportsQuery {
    /// The report as JSON, shaped like the `/report` endpoint's body.
    async fn report(
        &self,
        context: &Context<'_>,
        #[graphql(name = "type")] kind: Option<String>,
        limit: Option<i64>,
        project: Option<String>,
    ) -> GqlResult<Json<Report>> {
        let state = context.data_unchecked::<AppState>();
        let limit = limit.map(|l| l.to_string());
        let request = ReportRequest::parse(kind.as_deref(), limit.as_deref(), project.as_deref());
        Ok(Json(state.reports.report(request).await?))
    }

    async fn projects_list(&self, context: &Context<'_>) -> GqlResult<Vec<String>> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.report_filters.projects_list().await?)
    }

    async fn time_range(&self, context: &Context<'_>) -> GqlResult<GqlTimeRange> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.report_filters.time_range().await?.into())
    }
}
