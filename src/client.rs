use std::future::Future;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::FetchError;
use crate::models::{GithubProfile, RepoSummary, UserRecord};

/// Upper bound on repos per profile, matching the `per_page` of the query.
pub const REPO_LIMIT: usize = 10;

/// The remote reads the views depend on.
pub trait Source: Send + Sync + 'static {
    fn fetch_users(&self) -> impl Future<Output = Result<Vec<UserRecord>, FetchError>> + Send;

    fn fetch_profile(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<GithubProfile, FetchError>> + Send;

    fn fetch_repos(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<RepoSummary>, FetchError>> + Send;
}

/// reqwest-backed [`Source`] talking to the mock user API and GitHub.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    users_url: String,
    github_base: String,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(config)?,
            users_url: config.users_url.clone(),
            github_base: config.github_base().to_string(),
        })
    }

    async fn send(&self, url: &str) -> Result<Response, FetchError> {
        debug!(%url, "GET");
        self.client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)
    }
}

/// Creates a preconfigured HTTP client with required headers.
fn build_client(config: &Config) -> Result<Client, FetchError> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("pulseboard"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

    let mut builder = Client::builder().default_headers(headers);
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(FetchError::Client)
}

/// Rejects non-2xx responses, then decodes the body into `T`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(FetchError::Network)?;
    Ok(serde_json::from_slice(&body)?)
}

impl Source for HttpClient {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        let response = self.send(&self.users_url).await?;
        let users: Vec<UserRecord> = decode(response).await?;
        debug!(count = users.len(), "fetched users");
        Ok(users)
    }

    async fn fetch_profile(&self, username: &str) -> Result<GithubProfile, FetchError> {
        let url = format!("{}/users/{}", self.github_base, encode_segment(username));
        let response = self.send(&url).await?;

        // Every failed lookup reads as a missing user, whatever the status.
        if !response.status().is_success() {
            warn!(%username, status = response.status().as_u16(), "profile lookup failed");
            return Err(FetchError::NotFound);
        }

        decode(response).await
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<RepoSummary>, FetchError> {
        let url = format!(
            "{}/users/{}/repos?sort=updated&per_page={REPO_LIMIT}",
            self.github_base,
            encode_segment(username)
        );
        let response = self.send(&url).await?;
        let mut repos: Vec<RepoSummary> = decode(response).await?;
        repos.truncate(REPO_LIMIT);
        Ok(repos)
    }
}

/// Percent-encoding for a single URL path segment.
fn encode_segment(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() || "-._~".contains(c) => c.to_string(),
            c => {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{b:02X}"))
                    .collect()
            }
        })
        .collect()
}
