use std::sync::Arc;
use tracing::info;

use crate::modules::timers::core::project::{Project, decide_project_name};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::{ProjectStore, StoreError};

pub struct ManageProjectsHandler {
    projects: Arc<dyn ProjectStore>,
}

impl ManageProjectsHandler {
    pub fn new(projects: Arc<dyn ProjectStore>) -> Self {
        Self { projects }
    }

    pub async fn add_project(&self, name: &str) -> Result<Project, ApplicationError> {
        let name =
            decide_project_name(name).map_err(|e| ApplicationError::validation(e.to_string()))?;
        let project = self
            .projects
            .insert_project(&name)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    ApplicationError::Conflict("Project name already exists".into())
                }
                other => other.into(),
            })?;
        info!(project_id = project.id, name = %project.name, "project added");
        Ok(project)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApplicationError> {
        Ok(self.projects.list_projects().await?)
    }

    /// Deletes the project together with its timers, goals and achievements.
    pub async fn delete_project(&self, project_id: i64) -> Result<(), ApplicationError> {
        if !self.projects.delete_project(project_id).await? {
            return Err(ApplicationError::not_found("Project not found"));
        }
        info!(project_id, "project deleted");
        Ok(())
    }
}
