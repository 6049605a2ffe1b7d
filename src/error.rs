use thiserror::Error;

/// Failures of a single remote read.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("User not found")]
    NotFound,
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    #[error("unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Short name of the failure class, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::NotFound => "not_found",
            FetchError::Http { .. } => "http",
            FetchError::Parse(_) => "parse",
            FetchError::Client(_) => "client",
        }
    }
}
