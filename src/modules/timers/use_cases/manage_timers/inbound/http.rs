use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StartTimerBody {
    pub project_id: i64,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct StopTimerBody {
    pub timer_id: i64,
}

#[derive(Deserialize)]
pub struct EditTimerBody {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Serialize)]
pub struct StartTimerResponse {
    pub status: &'static str,
    pub timer_id: i64,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

fn status(status: &'static str) -> axum::response::Response {
    Json(StatusResponse { status }).into_response()
}

pub async fn handle_start(
    State(state): State<AppState>,
    body: Result<Json<StartTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.timers.start_timer(body.project_id, &body.description).await {
        Ok(timer_id) => Json(StartTimerResponse {
            status: "Timer started",
            timer_id,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_stop(
    State(state): State<AppState>,
    body: Result<Json<StopTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.timers.stop_timer(body.timer_id).await {
        Ok(outcome) => status(outcome.status()),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_restart(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.timers.restart_timer(id).await {
        Ok(timer_id) => Json(StartTimerResponse {
            status: "Timer restarted successfully",
            timer_id,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_active(State(state): State<AppState>) -> impl IntoResponse {
    match state.timers.active_timers().await {
        Ok(timers) => Json(timers).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<EditTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state
        .timers
        .edit_timer(id, &body.start_time, &body.end_time)
        .await
    {
        Ok(()) => status("Timer updated successfully"),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.timers.delete_timer(id).await {
        Ok(()) => status("Timer deleted successfully"),
        Err(e) => e.into_response(),
    }
}
