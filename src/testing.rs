//! # Test sources
//!
//! An in-memory [`Source`] for exercising the views without a network.
//! Responses, failures and per-user latency are set up front; every call is
//! recorded so tests can assert on fetch ordering.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;

use crate::client::Source;
use crate::config::Config;
use crate::error::FetchError;
use crate::models::{Address, Company, GithubProfile, RepoSummary, UserRecord};

#[derive(Default)]
pub struct FakeSource {
    users: Option<Vec<UserRecord>>,
    users_status: Option<u16>,
    users_malformed: bool,
    users_delay: Duration,
    profiles: HashMap<String, GithubProfile>,
    repos: HashMap<String, Vec<RepoSummary>>,
    failing_repos: Vec<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, users: Vec<UserRecord>) -> Self {
        self.users = Some(users);
        self
    }

    pub fn with_users_status(mut self, status: u16) -> Self {
        self.users_status = Some(status);
        self
    }

    pub fn with_malformed_users(mut self) -> Self {
        self.users_malformed = true;
        self
    }

    pub fn with_users_delay(mut self, delay: Duration) -> Self {
        self.users_delay = delay;
        self
    }

    pub fn with_profile(mut self, profile: GithubProfile, repos: Vec<RepoSummary>) -> Self {
        self.repos.insert(profile.login.clone(), repos);
        self.profiles.insert(profile.login.clone(), profile);
        self
    }

    pub fn with_failing_repos(mut self, login: &str) -> Self {
        self.failing_repos.push(login.to_string());
        self
    }

    pub fn with_delay(mut self, login: &str, delay: Duration) -> Self {
        self.delays.insert(login.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn delay_for(&self, login: &str) -> Duration {
        self.delays.get(login).copied().unwrap_or_default()
    }
}

impl Source for FakeSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        self.record("users".to_string());
        tokio::time::sleep(self.users_delay).await;

        if let Some(status) = self.users_status {
            return Err(FetchError::Http { status });
        }
        if self.users_malformed {
            return Err(serde_json::from_str::<Vec<UserRecord>>(r#"[{"id": 1}]"#)
                .unwrap_err()
                .into());
        }
        Ok(self.users.clone().unwrap_or_default())
    }

    async fn fetch_profile(&self, username: &str) -> Result<GithubProfile, FetchError> {
        self.record(format!("profile:{username}"));
        tokio::time::sleep(self.delay_for(username)).await;
        self.profiles
            .get(username)
            .cloned()
            .ok_or(FetchError::NotFound)
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<RepoSummary>, FetchError> {
        self.record(format!("repos:{username}"));
        if self.failing_repos.iter().any(|l| l == username) {
            return Err(FetchError::Http { status: 502 });
        }
        Ok(self.repos.get(username).cloned().unwrap_or_default())
    }
}

pub fn user(id: u64, city: &str, company: &str) -> UserRecord {
    UserRecord {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        address: Address {
            street: format!("{id} Main St"),
            city: city.to_string(),
        },
        company: Company {
            name: company.to_string(),
        },
        phone: "555-0100".to_string(),
    }
}

pub fn profile(login: &str) -> GithubProfile {
    GithubProfile {
        login: login.to_string(),
        avatar_url: format!("https://avatars.example.com/{login}"),
        profile_url: format!("https://github.com/{login}"),
        name: Some(format!("{login} name")),
        bio: None,
        followers: 5,
        following: 2,
        company: None,
        location: Some("Earth".to_string()),
        blog_url: None,
        twitter_handle: None,
    }
}

pub fn repo(id: u64, name: &str) -> RepoSummary {
    RepoSummary {
        id,
        name: name.to_string(),
        url: format!("https://github.com/x/{name}"),
        description: Some(format!("{name} description")),
        star_count: id as u32,
        fork_count: 1,
        language: Some("Rust".to_string()),
    }
}

/// Options as the command line resolves them with no flags given.
pub fn config() -> Config {
    crate::Cli::try_parse_from(["pulseboard", "dashboard"])
        .unwrap()
        .config
}
