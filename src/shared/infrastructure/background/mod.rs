// Fire-and-forget goal refreshes after a timer mutation.
//
// Responsibilities
// - Run `sync_today` for one project on a tracked task, off the request path.
// - Log failures and panics of the refresh. Nothing is returned to the caller.
// - Let shutdown wait for refreshes still in flight.

use std::sync::Arc;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, warn};

use crate::modules::goals::use_cases::sync_achievements::handler::{
    AchievementSynchronizer, SyncScope,
};

#[derive(Clone)]
pub struct BackgroundRefresher {
    synchronizer: Arc<AchievementSynchronizer>,
    tracker: TaskTracker,
}

impl BackgroundRefresher {
    pub fn new(synchronizer: Arc<AchievementSynchronizer>) -> Self {
        Self {
            synchronizer,
            tracker: TaskTracker::new(),
        }
    }

    pub fn refresh_project(&self, project_id: i64) {
        let synchronizer = self.synchronizer.clone();
        let refresh = tokio::spawn(async move {
            synchronizer.sync_today(SyncScope::Project(project_id)).await
        });

        self.tracker.spawn(async move {
            match refresh.await {
                Ok(Ok(report)) => {
                    debug!(
                        project_id,
                        refreshed = report.refreshed,
                        skipped = report.skipped,
                        "background goal refresh done"
                    );
                }
                Ok(Err(e)) => warn!(project_id, error = %e, "background goal refresh failed"),
                Err(e) => error!(project_id, error = %e, "background goal refresh panicked"),
            }
        });
    }

    /// Wait for every refresh spawned so far. New refreshes are accepted afterwards.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }
}
