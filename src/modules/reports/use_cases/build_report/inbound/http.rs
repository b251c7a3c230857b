use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::reports::use_cases::build_report::query::ReportRequest;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ReportParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
    pub project: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> impl IntoResponse {
    let request = ReportRequest::parse(
        params.kind.as_deref(),
        params.limit.as_deref(),
        params.project.as_deref(),
    );

    match state.reports.report(request).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => e.into_response(),
    }
}
