use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, response::Html};

use crate::modules::goals::use_cases::goal_progress::inbound::graphql::GoalsQuery;
use crate::modules::reports::use_cases::build_report::inbound::graphql::ReportsQuery;
use crate::modules::reports::use_cases::timer_activity::inbound::graphql::ActivityQuery;
use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(GoalsQuery, ReportsQuery, ActivityQuery);

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .data(state)
        .finish()
}

pub async fn graphql(
    Extension(schema): Extension<AppSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}

#[cfg(test)]
mod graphql_schema_tests {
    use std::sync::Arc;

    use crate::shared::core::ports::{GoalStore, IntervalStore, ProjectStore};
    use crate::shared::infrastructure::store::in_memory::InMemoryStore;
    use crate::tests::fixtures::{at, test_state};

    use super::build_schema;

    #[tokio::test]
    async fn it_should_expose_goals_with_progress() {
        let store = Arc::new(InMemoryStore::new());
        let project = store.insert_project("Writing").await.unwrap();
        store.insert_goal(project.id, 30, at(8, 0)).await.unwrap();
        let interval = store.start_interval(project.id, "", at(9, 0)).await.unwrap();
        store.close_interval(interval.id, at(9, 30)).await.unwrap();

        let response = build_schema(test_state(store))
            .execute("{ goals { projectName targetMinutes streak todayProgress todayAchieved } }")
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let json = response.data.into_json().unwrap();
        assert_eq!(json["goals"][0]["projectName"], "Writing");
        assert_eq!(json["goals"][0]["todayProgress"], 30.0);
        assert_eq!(json["goals"][0]["todayAchieved"], true);
        assert_eq!(json["goals"][0]["streak"], 1);
    }

    #[tokio::test]
    async fn it_should_expose_reports_as_json() {
        let store = Arc::new(InMemoryStore::new());
        let project = store.insert_project("Writing").await.unwrap();
        let interval = store.start_interval(project.id, "", at(9, 0)).await.unwrap();
        store.close_interval(interval.id, at(10, 30)).await.unwrap();

        let response = build_schema(test_state(store))
            .execute(concat!(
                r#"{ report(type: "monthly", limit: 2) projectsList "#,
                "timeRange { minDate maxDate } }",
            ))
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let json = response.data.into_json().unwrap();
        assert_eq!(json["report"]["type"], "monthly");
        assert_eq!(json["report"]["data"][0]["month"], "October");
        assert_eq!(json["report"]["total_hours"], 1.5);
        assert_eq!(json["projectsList"][0], "Writing");
        assert_eq!(json["timeRange"]["minDate"], "2026-10-17");
    }

    #[tokio::test]
    async fn it_should_expose_timer_activity_as_json() {
        let store = Arc::new(InMemoryStore::new());
        let project = store.insert_project("Writing").await.unwrap();
        store.start_interval(project.id, "draft", at(11, 0)).await.unwrap();

        let response = build_schema(test_state(store))
            .execute("{ todayTimers recentTimers lastDays }")
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let json = response.data.into_json().unwrap();
        assert_eq!(json["todayTimers"][0]["total_hours"], 1.0);
        assert_eq!(json["recentTimers"], serde_json::json!([]));
        assert_eq!(json["lastDays"][0]["date"], "2026-10-17");
    }

    #[tokio::test]
    async fn it_should_answer_an_unknown_report_type_with_the_overview() {
        let response = build_schema(test_state(Arc::new(InMemoryStore::new())))
            .execute(r#"{ report(type: "yearly") }"#)
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let json = response.data.into_json().unwrap();
        assert_eq!(json["report"]["type"], "overview");
    }

    #[tokio::test]
    async fn it_should_surface_storage_errors() {
        let mut store = InMemoryStore::new();
        store.toggle_offline();

        let response = build_schema(test_state(Arc::new(store)))
            .execute("{ projectsList }")
            .await;

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "backend error: Store offline");
    }
}
