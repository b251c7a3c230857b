use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct AddProjectBody {
    pub name: String,
}

#[derive(Serialize)]
pub struct AddProjectResponse {
    pub status: &'static str,
    pub project_id: i64,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn handle_list(State(state): State<AppState>) -> impl IntoResponse {
    match state.projects.list_projects().await {
        Ok(projects) => Json(projects).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_add(
    State(state): State<AppState>,
    body: Result<Json<AddProjectBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.projects.add_project(&body.name).await {
        Ok(project) => Json(AddProjectResponse {
            status: "Project added successfully",
            project_id: project.id,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.projects.delete_project(id).await {
        Ok(()) => Json(StatusResponse {
            status: "Project deleted successfully",
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}
