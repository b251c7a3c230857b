// SQLite implementation of every storage port.
//
// Purpose
// - Persist projects, timers, goals and daily achievements in one SQLite file.
//
// Responsibilities
// - Open the pool with WAL journaling, a busy timeout and foreign keys enforced.
// - Apply the embedded migrations.
// - Translate rows to core types and sqlx errors to `StoreError`.
//
// Boundaries
// - Timestamps are written as local wall time `YYYY-MM-DD HH:MM:SS`.
// - Day filters use `DATE(start_time)`.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::modules::goals::core::goal::{Goal, GoalAchievement};
use crate::modules::reports::core::report::TimeRange;
use crate::modules::timers::core::interval::{
    ActiveInterval, CompletedInterval, LoggedInterval, TimerInterval,
};
use crate::modules::timers::core::project::Project;
use crate::shared::core::clock::format_day;
use crate::shared::core::ports::{GoalStore, IntervalStore, ProjectStore, ReportQueries, StoreError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn backend(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(db.message().to_string())
        }
        _ => StoreError::Backend(error.to_string()),
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(backend)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        if let Some(parent) = Path::new(options.get_filename()).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Backend(format!("Failed to create database directory: {e}"))
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(backend)?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, FromRow)]
struct TimerRow {
    id: i64,
    project_id: i64,
    description: String,
    start_time: NaiveDateTime,
    end_time: Option<NaiveDateTime>,
}

impl From<TimerRow> for TimerInterval {
    fn from(row: TimerRow) -> Self {
        TimerInterval {
            id: row.id,
            project_id: row.project_id,
            description: row.description,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

#[derive(Debug, FromRow)]
struct ActiveRow {
    id: i64,
    project: String,
    description: String,
    start_time: NaiveDateTime,
}

#[derive(Debug, FromRow)]
struct GoalRow {
    id: i64,
    project_id: i64,
    project_name: String,
    target_minutes: i64,
    start_date: NaiveDateTime,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Goal {
            id: row.id,
            project_id: row.project_id,
            project_name: row.project_name,
            target_minutes: row.target_minutes,
            start_date: row.start_date,
        }
    }
}

#[derive(Debug, FromRow)]
struct AchievementRow {
    goal_id: i64,
    achievement_date: NaiveDate,
    minutes_achieved: f64,
}

impl From<AchievementRow> for GoalAchievement {
    fn from(row: AchievementRow) -> Self {
        GoalAchievement {
            goal_id: row.goal_id,
            achievement_date: row.achievement_date,
            minutes_achieved: row.minutes_achieved,
        }
    }
}

#[derive(Debug, FromRow)]
struct CompletedRow {
    project_name: String,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
}

#[derive(Debug, FromRow)]
struct LoggedRow {
    id: i64,
    project_name: String,
    description: String,
    start_time: NaiveDateTime,
    end_time: Option<NaiveDateTime>,
}

impl From<LoggedRow> for LoggedInterval {
    fn from(row: LoggedRow) -> Self {
        LoggedInterval {
            id: row.id,
            project_name: row.project_name,
            description: row.description,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

#[derive(Debug, FromRow)]
struct RangeRow {
    min_date: Option<String>,
    max_date: Option<String>,
}

const GOAL_COLUMNS: &str = r#"
    SELECT g.id, g.project_id, p.name AS project_name, g.target_minutes, g.start_date
    FROM goals g
    JOIN projects p ON p.id = g.project_id
"#;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for SqliteStore {
    async fn insert_project(&self, name: &str) -> Result<Project, StoreError> {
        let result = sqlx::query("INSERT INTO projects (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(Project {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    async fn find_project(&self, id: i64) -> Result<Option<Project>, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT id, name FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(Project::from))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query_as::<_, ProjectRow>("SELECT id, name FROM projects ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn delete_project(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl IntervalStore for SqliteStore {
    async fn start_interval(
        &self,
        project_id: i64,
        description: &str,
        start_time: NaiveDateTime,
    ) -> Result<TimerInterval, StoreError> {
        let result = sqlx::query(
            "INSERT INTO timers (project_id, description, start_time) VALUES (?, ?, ?)",
        )
        .bind(project_id)
        .bind(description)
        .bind(format_timestamp(start_time))
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(TimerInterval {
            id: result.last_insert_rowid(),
            project_id,
            description: description.to_string(),
            start_time,
            end_time: None,
        })
    }

    async fn find_interval(&self, id: i64) -> Result<Option<TimerInterval>, StoreError> {
        let row = sqlx::query_as::<_, TimerRow>(
            "SELECT id, project_id, description, start_time, end_time FROM timers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(TimerInterval::from))
    }

    async fn open_intervals(&self) -> Result<Vec<ActiveInterval>, StoreError> {
        let rows = sqlx::query_as::<_, ActiveRow>(
            r#"
            SELECT t.id, p.name AS project, t.description, t.start_time
            FROM timers t
            JOIN projects p ON p.id = t.project_id
            WHERE t.end_time IS NULL
            ORDER BY t.start_time
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows
            .into_iter()
            .map(|row| ActiveInterval {
                id: row.id,
                project: row.project,
                description: row.description,
                start_time: row.start_time,
            })
            .collect())
    }

    async fn close_interval(&self, id: i64, end_time: NaiveDateTime) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE timers SET end_time = ? WHERE id = ? AND end_time IS NULL")
            .bind(format_timestamp(end_time))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_interval_bounds(
        &self,
        id: i64,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE timers SET start_time = ?, end_time = ? WHERE id = ?")
            .bind(format_timestamp(start_time))
            .bind(format_timestamp(end_time))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn delete_interval(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM timers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn intervals_started_on(
        &self,
        project_id: i64,
        day: NaiveDate,
    ) -> Result<Vec<TimerInterval>, StoreError> {
        let rows = sqlx::query_as::<_, TimerRow>(
            r#"
            SELECT id, project_id, description, start_time, end_time
            FROM timers
            WHERE project_id = ? AND DATE(start_time) = ?
            "#,
        )
        .bind(project_id)
        .bind(format_day(day))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(TimerInterval::from).collect())
    }
}

#[async_trait]
impl GoalStore for SqliteStore {
    async fn insert_goal(
        &self,
        project_id: i64,
        target_minutes: i64,
        start_date: NaiveDateTime,
    ) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO goals (project_id, target_minutes, start_date) VALUES (?, ?, ?)",
        )
        .bind(project_id)
        .bind(target_minutes)
        .bind(format_timestamp(start_date))
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(result.last_insert_rowid())
    }

    async fn list_goals(&self) -> Result<Vec<Goal>, StoreError> {
        let sql = format!("{GOAL_COLUMNS} ORDER BY g.id DESC");
        let rows = sqlx::query_as::<_, GoalRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn goals_for_project(&self, project_id: i64) -> Result<Vec<Goal>, StoreError> {
        let sql = format!("{GOAL_COLUMNS} WHERE g.project_id = ? ORDER BY g.id");
        let rows = sqlx::query_as::<_, GoalRow>(&sql)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn delete_goal(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM goals WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn upsert_achievement(&self, achievement: &GoalAchievement) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO goal_achievements (goal_id, achievement_date, minutes_achieved)
            VALUES (?, ?, ?)
            ON CONFLICT(goal_id, achievement_date)
            DO UPDATE SET minutes_achieved = excluded.minutes_achieved
            "#,
        )
        .bind(achievement.goal_id)
        .bind(format_day(achievement.achievement_date))
        .bind(achievement.minutes_achieved)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn find_achievement(
        &self,
        goal_id: i64,
        day: NaiveDate,
    ) -> Result<Option<GoalAchievement>, StoreError> {
        let row = sqlx::query_as::<_, AchievementRow>(
            r#"
            SELECT goal_id, achievement_date, minutes_achieved
            FROM goal_achievements
            WHERE goal_id = ? AND achievement_date = ?
            "#,
        )
        .bind(goal_id)
        .bind(format_day(day))
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(GoalAchievement::from))
    }

    async fn achievements_until(
        &self,
        goal_id: i64,
        day: NaiveDate,
    ) -> Result<Vec<GoalAchievement>, StoreError> {
        let rows = sqlx::query_as::<_, AchievementRow>(
            r#"
            SELECT goal_id, achievement_date, minutes_achieved
            FROM goal_achievements
            WHERE goal_id = ? AND achievement_date <= ?
            ORDER BY achievement_date DESC
            "#,
        )
        .bind(goal_id)
        .bind(format_day(day))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(GoalAchievement::from).collect())
    }
}

#[async_trait]
impl ReportQueries for SqliteStore {
    async fn completed_intervals(
        &self,
        since: Option<NaiveDate>,
    ) -> Result<Vec<CompletedInterval>, StoreError> {
        let rows = sqlx::query_as::<_, CompletedRow>(
            r#"
            SELECT p.name AS project_name, t.start_time, t.end_time
            FROM timers t
            JOIN projects p ON p.id = t.project_id
            WHERE t.end_time IS NOT NULL
              AND (? IS NULL OR DATE(t.start_time) >= ?)
            "#,
        )
        .bind(since.map(format_day))
        .bind(since.map(format_day))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows
            .into_iter()
            .map(|row| CompletedInterval {
                project_name: row.project_name,
                start_time: row.start_time,
                end_time: row.end_time,
            })
            .collect())
    }

    async fn intervals_since(&self, since: NaiveDate) -> Result<Vec<LoggedInterval>, StoreError> {
        let rows = sqlx::query_as::<_, LoggedRow>(
            r#"
            SELECT t.id, p.name AS project_name, t.description, t.start_time, t.end_time
            FROM timers t
            JOIN projects p ON p.id = t.project_id
            WHERE DATE(t.start_time) >= ?
            ORDER BY t.start_time DESC, t.id DESC
            "#,
        )
        .bind(format_day(since))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(LoggedInterval::from).collect())
    }

    async fn project_names(&self) -> Result<Vec<String>, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT name FROM projects ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(backend)
    }

    async fn time_range(&self) -> Result<TimeRange, StoreError> {
        let row = sqlx::query_as::<_, RangeRow>(
            r#"
            SELECT MIN(DATE(start_time)) AS min_date, MAX(DATE(start_time)) AS max_date
            FROM timers
            WHERE end_time IS NOT NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(TimeRange {
            min_date: row.min_date,
            max_date: row.max_date,
        })
    }
}
