// In memory implementation of every storage port.
//
// Purpose
// - Exercise use cases and HTTP handlers without a database.
//
// Responsibilities
// - Keep projects, timers, goals and achievements in maps behind one lock.
// - Mirror the SQLite adapter: cascades on delete, upsert keyed by (goal, day).
// - Simulate outages with `toggle_offline` and per-goal write failures with `poison_goal`.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;

use crate::modules::goals::core::goal::{Goal, GoalAchievement};
use crate::modules::reports::core::report::TimeRange;
use crate::modules::timers::core::interval::{
    ActiveInterval, CompletedInterval, LoggedInterval, TimerInterval,
};
use crate::modules::timers::core::project::Project;
use crate::shared::core::clock::format_day;
use crate::shared::core::ports::{GoalStore, IntervalStore, ProjectStore, ReportQueries, StoreError};

#[derive(Debug, Clone)]
struct GoalRow {
    id: i64,
    project_id: i64,
    target_minutes: i64,
    start_date: NaiveDateTime,
}

#[derive(Default)]
struct Tables {
    last_id: i64,
    projects: BTreeMap<i64, Project>,
    timers: BTreeMap<i64, TimerInterval>,
    goals: BTreeMap<i64, GoalRow>,
    achievements: BTreeMap<(i64, NaiveDate), f64>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn project_name(&self, project_id: i64) -> Option<&str> {
        self.projects.get(&project_id).map(|p| p.name.as_str())
    }

    fn goal_view(&self, row: &GoalRow) -> Option<Goal> {
        Some(Goal {
            id: row.id,
            project_id: row.project_id,
            project_name: self.project_name(row.project_id)?.to_string(),
            target_minutes: row.target_minutes,
            start_date: row.start_date,
        })
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    poisoned_goals: RwLock<HashSet<i64>>,
    is_offline: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Make every achievement write for `goal_id` fail.
    pub async fn poison_goal(&self, goal_id: i64) {
        self.poisoned_goals.write().await.insert(goal_id);
    }

    /// Drop one achievement row, as if that day had never been evaluated.
    pub async fn remove_achievement(&self, goal_id: i64, day: NaiveDate) {
        self.tables
            .write()
            .await
            .achievements
            .remove(&(goal_id, day));
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn insert_project(&self, name: &str) -> Result<Project, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if tables.projects.values().any(|p| p.name == name) {
            return Err(StoreError::Conflict(format!("project {name} already exists")));
        }
        let project = Project {
            id: tables.next_id(),
            name: name.to_string(),
        };
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: i64) -> Result<Option<Project>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.projects.values().cloned().collect())
    }

    async fn delete_project(&self, id: i64) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if tables.projects.remove(&id).is_none() {
            return Ok(false);
        }
        tables.timers.retain(|_, t| t.project_id != id);
        let goal_ids: HashSet<i64> = tables
            .goals
            .values()
            .filter(|g| g.project_id == id)
            .map(|g| g.id)
            .collect();
        tables.goals.retain(|goal_id, _| !goal_ids.contains(goal_id));
        tables
            .achievements
            .retain(|(goal_id, _), _| !goal_ids.contains(goal_id));
        Ok(true)
    }
}

#[async_trait]
impl IntervalStore for InMemoryStore {
    async fn start_interval(
        &self,
        project_id: i64,
        description: &str,
        start_time: NaiveDateTime,
    ) -> Result<TimerInterval, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let interval = TimerInterval {
            id: tables.next_id(),
            project_id,
            description: description.to_string(),
            start_time,
            end_time: None,
        };
        tables.timers.insert(interval.id, interval.clone());
        Ok(interval)
    }

    async fn find_interval(&self, id: i64) -> Result<Option<TimerInterval>, StoreError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.timers.get(&id).cloned())
    }

    async fn open_intervals(&self) -> Result<Vec<ActiveInterval>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .timers
            .values()
            .filter(|t| t.is_open())
            .filter_map(|t| {
                Some(ActiveInterval {
                    id: t.id,
                    project: tables.project_name(t.project_id)?.to_string(),
                    description: t.description.clone(),
                    start_time: t.start_time,
                })
            })
            .collect())
    }

    async fn close_interval(&self, id: i64, end_time: NaiveDateTime) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        match tables.timers.get_mut(&id) {
            Some(interval) if interval.is_open() => {
                interval.end_time = Some(end_time);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_interval_bounds(
        &self,
        id: i64,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<(), StoreError> {
        self.ensure_online()?;
        if let Some(interval) = self.tables.write().await.timers.get_mut(&id) {
            interval.start_time = start_time;
            interval.end_time = Some(end_time);
        }
        Ok(())
    }

    async fn delete_interval(&self, id: i64) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.tables.write().await.timers.remove(&id);
        Ok(())
    }

    async fn intervals_started_on(
        &self,
        project_id: i64,
        day: NaiveDate,
    ) -> Result<Vec<TimerInterval>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .tables
            .read()
            .await
            .timers
            .values()
            .filter(|t| t.project_id == project_id && t.start_day() == day)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GoalStore for InMemoryStore {
    async fn insert_goal(
        &self,
        project_id: i64,
        target_minutes: i64,
        start_date: NaiveDateTime,
    ) -> Result<i64, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        tables.goals.insert(
            id,
            GoalRow {
                id,
                project_id,
                target_minutes,
                start_date,
            },
        );
        Ok(id)
    }

    async fn list_goals(&self) -> Result<Vec<Goal>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .goals
            .values()
            .rev()
            .filter_map(|row| tables.goal_view(row))
            .collect())
    }

    async fn goals_for_project(&self, project_id: i64) -> Result<Vec<Goal>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .goals
            .values()
            .filter(|row| row.project_id == project_id)
            .filter_map(|row| tables.goal_view(row))
            .collect())
    }

    async fn delete_goal(&self, id: i64) -> Result<bool, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if tables.goals.remove(&id).is_none() {
            return Ok(false);
        }
        tables.achievements.retain(|(goal_id, _), _| *goal_id != id);
        Ok(true)
    }

    async fn upsert_achievement(&self, achievement: &GoalAchievement) -> Result<(), StoreError> {
        self.ensure_online()?;
        if self
            .poisoned_goals
            .read()
            .await
            .contains(&achievement.goal_id)
        {
            return Err(StoreError::Backend(format!(
                "achievement write rejected for goal {}",
                achievement.goal_id
            )));
        }
        self.tables.write().await.achievements.insert(
            (achievement.goal_id, achievement.achievement_date),
            achievement.minutes_achieved,
        );
        Ok(())
    }

    async fn find_achievement(
        &self,
        goal_id: i64,
        day: NaiveDate,
    ) -> Result<Option<GoalAchievement>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .tables
            .read()
            .await
            .achievements
            .get(&(goal_id, day))
            .map(|&minutes_achieved| GoalAchievement {
                goal_id,
                achievement_date: day,
                minutes_achieved,
            }))
    }

    async fn achievements_until(
        &self,
        goal_id: i64,
        day: NaiveDate,
    ) -> Result<Vec<GoalAchievement>, StoreError> {
        self.ensure_online()?;
        Ok(self
            .tables
            .read()
            .await
            .achievements
            .range((goal_id, NaiveDate::MIN)..=(goal_id, day))
            .map(|(&(goal_id, achievement_date), &minutes_achieved)| GoalAchievement {
                goal_id,
                achievement_date,
                minutes_achieved,
            })
            .collect())
    }
}

#[async_trait]
impl ReportQueries for InMemoryStore {
    async fn completed_intervals(
        &self,
        since: Option<NaiveDate>,
    ) -> Result<Vec<CompletedInterval>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .timers
            .values()
            .filter(|t| since.is_none_or(|since| t.start_day() >= since))
            .filter_map(|t| {
                Some(CompletedInterval {
                    project_name: tables.project_name(t.project_id)?.to_string(),
                    start_time: t.start_time,
                    end_time: t.end_time?,
                })
            })
            .collect())
    }

    async fn intervals_since(&self, since: NaiveDate) -> Result<Vec<LoggedInterval>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut intervals: Vec<LoggedInterval> = tables
            .timers
            .values()
            .filter(|t| t.start_day() >= since)
            .filter_map(|t| {
                Some(LoggedInterval {
                    id: t.id,
                    project_name: tables.project_name(t.project_id)?.to_string(),
                    description: t.description.clone(),
                    start_time: t.start_time,
                    end_time: t.end_time,
                })
            })
            .collect();
        intervals.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        Ok(intervals)
    }

    async fn project_names(&self) -> Result<Vec<String>, StoreError> {
        self.ensure_online()?;
        let mut names: Vec<String> = self
            .tables
            .read()
            .await
            .projects
            .values()
            .map(|p| p.name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn time_range(&self) -> Result<TimeRange, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let days: Vec<NaiveDate> = tables
            .timers
            .values()
            .filter(|t| !t.is_open())
            .map(|t| t.start_day())
            .collect();
        let min = days.iter().min().copied();
        let max = days.iter().max().copied();
        Ok(TimeRange {
            min_date: min.map(format_day),
            max_date: max.map(format_day),
        })
    }
}
