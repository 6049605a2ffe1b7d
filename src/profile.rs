//! GitHub profile lookup: a profile card plus its most recently updated repos.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::Source;
use crate::error::FetchError;
use crate::models::ProfileData;
use crate::view_state::StateCell;

pub struct ProfileView<S: Source> {
    source: Arc<S>,
    state: Arc<StateCell<ProfileData>>,
}

impl<S: Source> ProfileView<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: Arc::new(StateCell::new()),
        }
    }

    pub fn state(&self) -> &StateCell<ProfileData> {
        &self.state
    }

    /// Looks up `username`. Blank input is ignored and returns `None`.
    ///
    /// A new search supersedes any search still in flight. On failure the
    /// error message is stored and the previous profile and repos are cleared.
    pub fn search(&self, username: &str) -> Option<JoinHandle<()>> {
        let username = username.trim();
        if username.is_empty() {
            return None;
        }

        let ticket = self.state.begin();
        let cell = Arc::downgrade(&self.state);
        let source = Arc::clone(&self.source);
        let username = username.to_string();

        info!(%username, generation = ticket.generation(), "searching profile");

        Some(tokio::spawn(async move {
            let result = lookup(source.as_ref(), &username).await;

            let Some(cell) = cell.upgrade() else {
                debug!(%username, "profile view closed before lookup settled");
                return;
            };

            match result {
                Ok(data) => {
                    debug!(%username, repos = data.repos.len(), "profile loaded");
                    cell.succeed(ticket, data);
                }
                Err(err) => {
                    warn!(%username, kind = err.kind(), error = %err, "profile lookup failed");
                    cell.fail(ticket, Some(err.to_string()), true);
                }
            }
        }))
    }
}

/// The repo list is only requested once the profile itself resolved.
async fn lookup<S: Source>(source: &S, username: &str) -> Result<ProfileData, FetchError> {
    let profile = source.fetch_profile(username).await?;
    let repos = source.fetch_repos(username).await?;
    Ok(ProfileData { profile, repos })
}
