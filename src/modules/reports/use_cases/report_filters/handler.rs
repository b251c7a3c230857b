use std::sync::Arc;

use crate::modules::reports::core::report::TimeRange;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::ReportQueries;

/// Values the report screen offers as filters.
pub struct ReportFiltersHandler {
    queries: Arc<dyn ReportQueries>,
}

impl ReportFiltersHandler {
    pub fn new(queries: Arc<dyn ReportQueries>) -> Self {
        Self { queries }
    }

    /// Distinct project names, alphabetical.
    pub async fn projects_list(&self) -> Result<Vec<String>, ApplicationError> {
        Ok(self.queries.project_names().await?)
    }

    pub async fn time_range(&self) -> Result<TimeRange, ApplicationError> {
        Ok(self.queries.time_range().await?)
    }
}
