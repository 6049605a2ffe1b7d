mod aggregate;
mod client;
mod config;
mod dashboard;
mod error;
mod models;
mod profile;
mod render;
mod view_state;

#[cfg(test)]
mod testing;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::client::HttpClient;
use crate::config::Config;
use crate::dashboard::DashboardView;
use crate::profile::ProfileView;
use crate::view_state::{Phase, ViewState};

#[derive(Debug, Parser)]
#[command(name = "pulseboard", version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize the mock user list: totals, cities, companies, growth.
    Dashboard {
        /// Print the summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Look up a GitHub user and their most recently updated repositories.
    Profile { username: String },
}

fn main() -> Result<ExitCode> {
    // Load .env variables
    dotenvy::dotenv().ok();
    let Cli {
        config,
        verbose,
        command,
    } = Cli::parse();
    setup_tracing(verbose);

    let client = Arc::new(HttpClient::new(&config).context("Failed to build HTTP client")?);

    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let phase = rt.block_on(async move {
        match command {
            Command::Dashboard { json } => run_dashboard(client, &config, json).await,
            Command::Profile { username } => run_profile(client, &username).await,
        }
    })?;

    Ok(match phase {
        Phase::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn setup_tracing(verbose: bool) {
    let default = if verbose { "pulseboard=debug,warn" } else { "pulseboard=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Redraws on every state change until the view leaves `Loading`.
async fn follow<T, F>(mut rx: watch::Receiver<ViewState<T>>, mut draw: F) -> Result<Phase>
where
    T: Clone,
    F: FnMut(&ViewState<T>) -> io::Result<()>,
{
    loop {
        let state = rx.borrow_and_update().clone();
        draw(&state)?;
        if !state.is_loading() {
            return Ok(state.phase);
        }
        rx.changed().await.context("view closed while loading")?;
    }
}

async fn run_dashboard(client: Arc<HttpClient>, config: &Config, json: bool) -> Result<Phase> {
    let view = DashboardView::new(client, config.loading_delay());
    let mut out = io::stdout().lock();

    let _load = view.activate();
    if json {
        let state = view.state().wait_settled().await;
        let summary = state.data.unwrap_or_default();
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
        return Ok(state.phase);
    }

    follow(view.state().subscribe(), |state| {
        render::dashboard(&mut out, state)?;
        writeln!(out)
    })
    .await
}

async fn run_profile(client: Arc<HttpClient>, username: &str) -> Result<Phase> {
    let view = ProfileView::new(client);
    let mut out = io::stdout().lock();

    if view.search(username).is_none() {
        anyhow::bail!("username must not be blank");
    }

    follow(view.state().subscribe(), |state| render::profile(&mut out, state)).await
}
