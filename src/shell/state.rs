use std::sync::Arc;

use crate::modules::goals::use_cases::goal_progress::handler::GoalProgressQueries;
use crate::modules::goals::use_cases::manage_goals::handler::ManageGoalsHandler;
use crate::modules::goals::use_cases::sync_achievements::handler::AchievementSynchronizer;
use crate::modules::reports::use_cases::build_report::handler::ReportHandler;
use crate::modules::reports::use_cases::report_filters::handler::ReportFiltersHandler;
use crate::modules::reports::use_cases::timer_activity::handler::TimerActivityHandler;
use crate::modules::timers::use_cases::manage_projects::handler::ManageProjectsHandler;
use crate::modules::timers::use_cases::manage_timers::handler::ManageTimersHandler;
use crate::shared::core::clock::Clock;
use crate::shared::core::ports::{GoalStore, IntervalStore, ProjectStore, ReportQueries};
use crate::shared::infrastructure::background::BackgroundRefresher;

#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<ManageProjectsHandler>,
    pub timers: Arc<ManageTimersHandler>,
    pub goals: Arc<ManageGoalsHandler>,
    pub goal_progress: Arc<GoalProgressQueries>,
    pub reports: Arc<ReportHandler>,
    pub report_filters: Arc<ReportFiltersHandler>,
    pub activity: Arc<TimerActivityHandler>,
    pub refresher: BackgroundRefresher,
}

impl AppState {
    /// Wire every use case onto one store that implements all storage ports.
    pub fn new<TStore>(store: Arc<TStore>, clock: Arc<dyn Clock>) -> Self
    where
        TStore: ProjectStore + IntervalStore + GoalStore + ReportQueries + 'static,
    {
        let synchronizer = Arc::new(AchievementSynchronizer::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        ));
        let refresher = BackgroundRefresher::new(synchronizer.clone());

        Self {
            projects: Arc::new(ManageProjectsHandler::new(store.clone())),
            timers: Arc::new(ManageTimersHandler::new(
                store.clone(),
                store.clone(),
                clock.clone(),
                refresher.clone(),
            )),
            goals: Arc::new(ManageGoalsHandler::new(
                store.clone(),
                store.clone(),
                clock.clone(),
            )),
            goal_progress: Arc::new(GoalProgressQueries::new(
                synchronizer,
                store.clone(),
                clock.clone(),
            )),
            reports: Arc::new(ReportHandler::new(store.clone(), clock.clone())),
            activity: Arc::new(TimerActivityHandler::new(store.clone(), clock)),
            report_filters: Arc::new(ReportFiltersHandler::new(store)),
            refresher,
        }
    }
}
