use crate::modules::goals::core::goal::GoalAchievement;
use crate::shared::core::ports::{GoalStore, IntervalStore, ProjectStore};
use crate::shared::infrastructure::store::in_memory::InMemoryStore;
use crate::tests::fixtures::{at, days_ago, test_state, today};
use std::sync::Arc;

async fn writing_goal(store: &InMemoryStore, target_minutes: i64) -> (i64, i64) {
    let project = store.insert_project("Writing").await.unwrap();
    let goal_id = store
        .insert_goal(project.id, target_minutes, at(8, 0))
        .await
        .unwrap();
    (project.id, goal_id)
}

#[tokio::test]
async fn an_open_interval_counts_towards_todays_progress() {
    let store = Arc::new(InMemoryStore::new());
    let (project_id, _) = writing_goal(&store, 60).await;
    store.start_interval(project_id, "", at(11, 20)).await.unwrap();
    let state = test_state(store);

    let goals = state.goal_progress.list_goals_with_progress().await.unwrap();

    assert_eq!(goals.len(), 1);
    let progress = goals[0].today_progress.unwrap();
    assert!((progress - 40.0).abs() < 1e-9);
    assert_eq!(goals[0].today_achieved, Some(false));
    assert_eq!(goals[0].streak, 0);
}

#[tokio::test]
async fn deleting_yesterday_breaks_the_streak_down_to_today() {
    let store = Arc::new(InMemoryStore::new());
    let (project_id, goal_id) = writing_goal(&store, 60).await;
    let interval = store.start_interval(project_id, "", at(9, 0)).await.unwrap();
    store.close_interval(interval.id, at(10, 30)).await.unwrap();
    for offset in [1, 2] {
        store
            .upsert_achievement(&GoalAchievement {
                goal_id,
                achievement_date: days_ago(offset),
                minutes_achieved: 60.0,
            })
            .await
            .unwrap();
    }
    let state = test_state(store.clone());

    let before = state.goal_progress.list_goals_with_progress().await.unwrap();
    assert_eq!(before[0].streak, 3);
    assert_eq!(before[0].today_progress, Some(90.0));

    store.remove_achievement(goal_id, days_ago(1)).await;

    let after = state.goal_progress.list_goals_with_progress().await.unwrap();
    assert_eq!(after[0].streak, 1);
}

#[tokio::test]
async fn reading_progress_twice_gives_the_same_result() {
    let store = Arc::new(InMemoryStore::new());
    let (project_id, goal_id) = writing_goal(&store, 30).await;
    let interval = store.start_interval(project_id, "", at(9, 0)).await.unwrap();
    store.close_interval(interval.id, at(9, 20)).await.unwrap();
    let state = test_state(store.clone());

    let first = state.goal_progress.home_dashboard().await.unwrap();
    let second = state.goal_progress.home_dashboard().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.achievements_until(goal_id, today()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn stopping_a_timer_refreshes_goals_in_the_background() {
    let store = Arc::new(InMemoryStore::new());
    let (project_id, goal_id) = writing_goal(&store, 30).await;
    let interval = store.start_interval(project_id, "", at(11, 0)).await.unwrap();
    let state = test_state(store.clone());

    state.timers.stop_timer(interval.id).await.unwrap();
    state.refresher.drain().await;

    let achievement = store.find_achievement(goal_id, today()).await.unwrap().unwrap();
    assert_eq!(achievement.minutes_achieved, 60.0);
    assert!(achievement.is_met(30));
}

#[tokio::test]
async fn a_failing_background_refresh_does_not_fail_the_stop() {
    let store = Arc::new(InMemoryStore::new());
    let (project_id, goal_id) = writing_goal(&store, 30).await;
    let interval = store.start_interval(project_id, "", at(11, 0)).await.unwrap();
    store.poison_goal(goal_id).await;
    let state = test_state(store.clone());

    let outcome = state.timers.stop_timer(interval.id).await;
    state.refresher.drain().await;

    assert!(outcome.is_ok());
    assert!(store.find_achievement(goal_id, today()).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_goal_removes_its_achievements() {
    let store = Arc::new(InMemoryStore::new());
    let (_, goal_id) = writing_goal(&store, 30).await;
    let state = test_state(store.clone());
    state.goal_progress.list_goals_with_progress().await.unwrap();
    assert!(store.find_achievement(goal_id, today()).await.unwrap().is_some());

    state.goals.delete_goal(goal_id).await.unwrap();

    assert!(store.find_achievement(goal_id, today()).await.unwrap().is_none());
    assert!(state.goal_progress.home_dashboard().await.unwrap().goals.is_empty());
}
