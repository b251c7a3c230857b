// Report queries.
//
// Responsibilities
// - Read the completed intervals of the requested window, keep the ones matching the project
//   filter, and aggregate them for the requested kind.
//
// Boundaries
// - Recomputes from raw intervals on every call. Goal achievements are never read here.

use std::sync::Arc;

use crate::modules::reports::core::aggregate::{daily, matches_filter, monthly, overview, weekly};
use crate::modules::reports::core::buckets::{window_days, window_start};
use crate::modules::reports::core::report::{Report, ReportKind};
use crate::modules::reports::use_cases::build_report::query::ReportRequest;
use crate::shared::core::clock::Clock;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::ReportQueries;

pub struct ReportHandler {
    queries: Arc<dyn ReportQueries>,
    clock: Arc<dyn Clock>,
}

impl ReportHandler {
    pub fn new(queries: Arc<dyn ReportQueries>, clock: Arc<dyn Clock>) -> Self {
        Self { queries, clock }
    }

    pub async fn report(&self, request: ReportRequest) -> Result<Report, ApplicationError> {
        let since = window_days(request.kind, request.limit.max(0))
            .map(|days| window_start(self.clock.today(), days));
        let intervals: Vec<_> = self
            .queries
            .completed_intervals(since)
            .await?
            .into_iter()
            .filter(|interval| matches_filter(&interval.project_name, &request.project))
            .collect();

        Ok(match request.kind {
            ReportKind::Overview => overview(&intervals),
            ReportKind::Daily => daily(&intervals),
            ReportKind::Weekly => weekly(&intervals),
            ReportKind::Monthly => monthly(&intervals),
        })
    }
}
