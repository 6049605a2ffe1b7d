//! The analytics dashboard over the mock user list.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::aggregate::summarize;
use crate::client::Source;
use crate::models::DashboardSummary;
use crate::view_state::StateCell;

pub struct DashboardView<S: Source> {
    source: Arc<S>,
    state: Arc<StateCell<DashboardSummary>>,
    loading_delay: Duration,
}

impl<S: Source> DashboardView<S> {
    /// `loading_delay` is the minimum time a successful load stays in `Loading`.
    pub fn new(source: Arc<S>, loading_delay: Duration) -> Self {
        Self {
            source,
            state: Arc::new(StateCell::new()),
            loading_delay,
        }
    }

    pub fn state(&self) -> &StateCell<DashboardSummary> {
        &self.state
    }

    /// Fetches the user list and rebuilds every panel from it.
    ///
    /// Failures are logged but leave no message in the view state: the
    /// dashboard degrades to whatever data it already had.
    pub fn activate(&self) -> JoinHandle<()> {
        let ticket = self.state.begin();
        let cell = Arc::downgrade(&self.state);
        let source = Arc::clone(&self.source);
        let ready_at = Instant::now() + self.loading_delay;

        info!(generation = ticket.generation(), "loading dashboard");

        tokio::spawn(async move {
            match source.fetch_users().await {
                Ok(users) => {
                    let summary = summarize(users, &mut rand::rng());
                    tokio::time::sleep_until(ready_at).await;

                    let Some(cell) = cell.upgrade() else {
                        debug!("dashboard closed before load settled");
                        return;
                    };
                    if cell.succeed(ticket, summary) {
                        info!(generation = ticket.generation(), "dashboard ready");
                    }
                }
                Err(err) => {
                    error!(kind = err.kind(), error = %err, "error fetching users");

                    let Some(cell) = cell.upgrade() else {
                        debug!("dashboard closed before load settled");
                        return;
                    };
                    cell.fail(ticket, None, false);
                }
            }
        })
    }
}
