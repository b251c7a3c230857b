use axum::{Json, extract::State, response::IntoResponse};

use crate::shell::state::AppState;

pub async fn handle_list(State(state): State<AppState>) -> impl IntoResponse {
    match state.goal_progress.list_goals_with_progress().await {
        Ok(goals) => Json(goals).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn handle_home_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    match state.goal_progress.home_dashboard().await {
        Ok(dashboard) => Json(dashboard).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod goal_progress_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::shared::core::ports::{GoalStore, IntervalStore, ProjectStore};
    use crate::shared::infrastructure::store::in_memory::InMemoryStore;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::{at, test_state};

    use super::{handle_home_dashboard, handle_list};

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/goals", get(handle_list))
            .route("/api/home", get(handle_home_dashboard))
            .with_state(state)
    }

    async fn seeded_store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        let project = store.insert_project("Writing").await.unwrap();
        store.insert_goal(project.id, 60, at(8, 0)).await.unwrap();
        store.start_interval(project.id, "", at(11, 20)).await.unwrap();
        store
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn it_should_list_goals_with_todays_progress() {
        let (status, json) = get_json(app(test_state(seeded_store().await)), "/goals").await;

        assert_eq!(status, StatusCode::OK);
        let goal = &json[0];
        assert_eq!(goal["project_name"], "Writing");
        assert_eq!(goal["target_minutes"], 60);
        assert_eq!(goal["today_progress"], 40.0);
        assert_eq!(goal["today_achieved"], false);
        assert_eq!(goal["streak"], 0);
    }

    #[tokio::test]
    async fn it_should_return_the_dashboard_with_the_local_date() {
        let (status, json) = get_json(app(test_state(seeded_store().await)), "/api/home").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["date"], "2026-10-17");
        assert_eq!(json["goals"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn it_should_return_500_when_the_store_is_offline() {
        let mut store = InMemoryStore::new();
        store.toggle_offline();
        let (status, json) = get_json(app(test_state(Arc::new(store))), "/goals").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().is_some());
    }
}
