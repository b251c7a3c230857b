use axum::{Json, extract::State, response::IntoResponse};

use crate::shell::state::AppState;

pub async fn handle_today(State(state): State<AppState>) -> impl IntoResponse {
    match state.activity.today_timers().await {
        Ok(projects) => Json(projects).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_recent(State(state): State<AppState>) -> impl IntoResponse {
    match state.activity.recent_timers().await {
        Ok(days) => Json(days).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_last_days(State(state): State<AppState>) -> impl IntoResponse {
    match state.activity.last_days().await {
        Ok(days) => Json(days).into_response(),
        Err(e) => e.into_response(),
    }
}
