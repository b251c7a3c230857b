use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct AddGoalBody {
    pub project_id: i64,
    pub target_minutes: i64,
}

#[derive(Serialize)]
pub struct AddGoalResponse {
    pub status: &'static str,
    pub goal_id: i64,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn handle_add(
    State(state): State<AppState>,
    body: Result<Json<AddGoalBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.goals.add_goal(body.project_id, body.target_minutes).await {
        Ok(goal_id) => Json(AddGoalResponse {
            status: "Goal added",
            goal_id,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.goals.delete_goal(id).await {
        Ok(()) => Json(StatusResponse {
            status: "Goal deleted successfully",
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}
