use crate::modules::reports::core::report::{Report, ReportKind};
use crate::modules::reports::use_cases::build_report::query::ReportRequest;
use crate::shared::core::ports::{GoalStore, IntervalStore, ProjectStore};
use crate::shared::infrastructure::store::in_memory::InMemoryStore;
use crate::shell::state::AppState;
use crate::tests::fixtures::{assert_hours, at, days_ago, on, test_state};
use chrono::NaiveDateTime;
use std::sync::Arc;

async fn track(store: &InMemoryStore, project_id: i64, start: NaiveDateTime, end: NaiveDateTime) {
    let interval = store.start_interval(project_id, "", start).await.unwrap();
    store.close_interval(interval.id, end).await.unwrap();
}

async fn report(state: &AppState, kind: ReportKind, limit: i64) -> Report {
    let request = ReportRequest {
        kind,
        limit,
        project: String::new(),
    };
    state.reports.report(request).await.unwrap()
}

async fn seeded_state() -> AppState {
    let store = Arc::new(InMemoryStore::new());
    let writing = store.insert_project("Writing").await.unwrap();
    let reading = store.insert_project("Reading").await.unwrap();
    track(&store, writing.id, at(9, 0), at(9, 30)).await;
    track(&store, writing.id, at(9, 30), at(10, 15)).await;
    track(&store, reading.id, on(days_ago(1), 20, 0), on(days_ago(1), 21, 30)).await;
    track(&store, reading.id, on(days_ago(9), 7, 0), on(days_ago(9), 7, 45)).await;
    store.start_interval(writing.id, "", at(11, 0)).await.unwrap();
    test_state(store)
}

#[tokio::test]
async fn two_writing_sessions_add_up_in_overview_and_daily() {
    let store = Arc::new(InMemoryStore::new());
    let writing = store.insert_project("Writing").await.unwrap();
    track(&store, writing.id, at(9, 0), at(9, 30)).await;
    track(&store, writing.id, at(9, 30), at(10, 15)).await;
    let state = test_state(store);

    let Report::Overview(overview) = report(&state, ReportKind::Overview, 30).await else {
        panic!("expected an overview report");
    };
    assert_eq!(overview.data.len(), 1);
    assert_hours(overview.data[0].total_hours, 1.25);

    let Report::Daily(daily) = report(&state, ReportKind::Daily, 30).await else {
        panic!("expected a daily report");
    };
    assert_eq!(daily.data.len(), 1);
    assert_eq!(daily.data[0].projects.len(), 1);
    assert_eq!(daily.data[0].projects[0].project_name, "Writing");
    assert_hours(daily.data[0].projects[0].hours, 1.25);
}

#[tokio::test]
async fn overview_total_equals_the_sum_of_unbounded_daily_buckets() {
    let state = seeded_state().await;

    let overview = report(&state, ReportKind::Overview, 30).await;
    let Report::Daily(daily) = report(&state, ReportKind::Daily, 36_500).await else {
        panic!("expected a daily report");
    };

    let bucket_sum: f64 = daily.data.iter().map(|bucket| bucket.total_hours).sum();
    assert_hours(overview.total_hours(), bucket_sum);
    assert_hours(overview.total_hours(), 3.5);
}

#[tokio::test]
async fn open_intervals_never_reach_a_report() {
    let state = seeded_state().await;

    let Report::Overview(overview) = report(&state, ReportKind::Overview, 30).await else {
        panic!("expected an overview report");
    };
    let writing = overview
        .data
        .iter()
        .find(|row| row.project_name == "Writing")
        .unwrap();
    assert_hours(writing.total_hours, 1.25);
}

#[tokio::test]
async fn weekly_buckets_are_monday_based_and_newest_first() {
    let state = seeded_state().await;

    let Report::Weekly(weekly) = report(&state, ReportKind::Weekly, 4).await else {
        panic!("expected a weekly report");
    };

    let starts: Vec<&str> = weekly.data.iter().map(|b| b.week_start.as_str()).collect();
    assert_eq!(starts, vec!["2026-10-12", "2026-10-05"]);
    assert_eq!(weekly.data[0].week_end, "2026-10-18");
    assert_eq!(weekly.data[0].projects[0].project_name, "Reading");
    assert_hours(weekly.data[0].total_hours, 2.75);
    assert_eq!(weekly.summary.total_weeks, 2);
    assert_hours(weekly.summary.avg_per_week, 1.75);
}

#[tokio::test]
async fn two_projects_in_one_month_share_a_bucket() {
    let store = Arc::new(InMemoryStore::new());
    let writing = store.insert_project("Writing").await.unwrap();
    let reading = store.insert_project("Reading").await.unwrap();
    track(&store, writing.id, on(days_ago(10), 9, 0), on(days_ago(10), 10, 0)).await;
    track(&store, reading.id, on(days_ago(2), 9, 0), on(days_ago(2), 9, 30)).await;
    let state = test_state(store);

    let Report::Monthly(monthly) = report(&state, ReportKind::Monthly, 1).await else {
        panic!("expected a monthly report");
    };

    assert_eq!(monthly.data.len(), 1);
    assert_eq!(monthly.data[0].month, "October");
    assert_eq!(monthly.data[0].year, 2026);
    assert_eq!(monthly.data[0].projects.len(), 2);
    assert_hours(monthly.data[0].total_hours, 1.5);
}

#[tokio::test]
async fn a_timer_stopped_before_its_start_counts_as_zero_everywhere() {
    let store = Arc::new(InMemoryStore::new());
    let writing = store.insert_project("Writing").await.unwrap();
    store.insert_goal(writing.id, 30, at(8, 0)).await.unwrap();
    // The local clock stepped back: the timer starts after the clock's 12:00.
    let interval = store.start_interval(writing.id, "", at(12, 30)).await.unwrap();
    let state = test_state(store);

    state.timers.stop_timer(interval.id).await.unwrap();
    state.refresher.drain().await;

    let goals = state.goal_progress.list_goals_with_progress().await.unwrap();
    assert_eq!(goals[0].today_progress, Some(0.0));
    let Report::Overview(overview) = report(&state, ReportKind::Overview, 30).await else {
        panic!("expected an overview report");
    };
    assert_hours(overview.data[0].total_hours, 0.0);
    assert_hours(overview.total_hours, 0.0);
    assert_hours(report(&state, ReportKind::Daily, 30).await.total_hours(), 0.0);
}
