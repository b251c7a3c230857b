use axum::{Json, extract::State, response::IntoResponse};

use crate::shell::state::AppState;

pub async fn handle_projects_list(State(state): State<AppState>) -> impl IntoResponse {
    match state.report_filters.projects_list().await {
        Ok(names) => Json(names).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_time_range(State(state): State<AppState>) -> impl IntoResponse {
    match state.report_filters.time_range().await {
        Ok(range) => Json(range).into_response(),
        Err(e) => e.into_response(),
    }
}
