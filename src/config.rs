use std::time::Duration;

use clap::Args;

pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

/// Endpoint and pacing options shared by every view.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Mock user list consumed by the dashboard.
    #[arg(long, env = "PULSEBOARD_USERS_URL", default_value = DEFAULT_USERS_URL, global = true)]
    pub users_url: String,

    /// Base URL of the GitHub REST API.
    #[arg(long, env = "PULSEBOARD_GITHUB_API", default_value = DEFAULT_GITHUB_API, global = true)]
    pub github_api: String,

    /// Minimum time the dashboard stays in its loading state, in milliseconds. 0 disables it.
    #[arg(long, env = "PULSEBOARD_LOADING_DELAY_MS", default_value_t = 1500, global = true)]
    pub loading_delay_ms: u64,

    /// Per-request timeout in seconds. Requests are unbounded when unset.
    #[arg(long, env = "PULSEBOARD_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// GitHub API base without a trailing slash.
    pub fn github_base(&self) -> &str {
        self.github_api.trim_end_matches('/')
    }
}
