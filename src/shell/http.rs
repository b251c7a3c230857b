use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use tracing::error;

use crate::modules::goals::use_cases::goal_progress::inbound::http as goal_progress_http;
use crate::modules::goals::use_cases::manage_goals::inbound::http as manage_goals_http;
use crate::modules::reports::use_cases::build_report::inbound::http as build_report_http;
use crate::modules::reports::use_cases::report_filters::inbound::http as report_filters_http;
use crate::modules::reports::use_cases::timer_activity::inbound::http as timer_activity_http;
use crate::modules::timers::use_cases::manage_projects::inbound::http as manage_projects_http;
use crate::modules::timers::use_cases::manage_timers::inbound::http as manage_timers_http;
use crate::shared::core::errors::ApplicationError;
use crate::shell::graphql::{build_schema, graphiql, graphql};
use crate::shell::state::AppState;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApplicationError::Validation(_) => StatusCode::BAD_REQUEST,
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationError::Conflict(_) => StatusCode::CONFLICT,
            ApplicationError::Storage(e) => {
                error!(error = %e, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());

    Router::new()
        .route("/goals", get(goal_progress_http::handle_list))
        .route("/goals/add", post(manage_goals_http::handle_add))
        .route("/goals/{id}", delete(manage_goals_http::handle_delete))
        .route("/api/home", get(goal_progress_http::handle_home_dashboard))
        .route("/report", get(build_report_http::handle))
        .route("/api/projects-list", get(report_filters_http::handle_projects_list))
        .route("/api/time-range", get(report_filters_http::handle_time_range))
        .route("/api/last-7-days", get(timer_activity_http::handle_last_days))
        .route("/projects", get(manage_projects_http::handle_list))
        .route("/projects/add", post(manage_projects_http::handle_add))
        .route("/projects/{id}", delete(manage_projects_http::handle_delete))
        .route("/timer/start", post(manage_timers_http::handle_start))
        .route("/timer/stop", post(manage_timers_http::handle_stop))
        .route("/timers/active", get(manage_timers_http::handle_active))
        .route("/timers/today", get(timer_activity_http::handle_today))
        .route("/timers/recent", get(timer_activity_http::handle_recent))
        .route("/timers/{id}/restart", post(manage_timers_http::handle_restart))
        .route(
            "/timers/{id}",
            put(manage_timers_http::handle_edit).delete(manage_timers_http::handle_delete),
        )
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .with_state(state)
}
