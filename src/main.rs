mod config;
mod github;
mod pr;
mod report;
#[cfg(test)]
mod test_support;

use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

use config::{Config, ConfigError};
use github::{Fetch, GitHubClient};
use pr::{EnrichFailure, PullRequestRecord};

const REVISION: &str = env!("OSSINT_REVISION");

/// ossint — list a GitHub user's open pull requests to other people's
/// repositories, most starred repository first.
#[derive(Parser, Debug)]
#[command(
    name = "ossint",
    about,
    disable_version_flag = true,
    after_help = "Long options take two dashes, e.g. --username octocat."
)]
struct Cli {
    /// Print version and revision, then exit
    #[arg(short = 'V', long)]
    version: bool,

    /// GitHub username whose pull requests are listed
    #[arg(long)]
    username: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN, the config file, then `gh auth token`)
    #[arg(long)]
    token: Option<String>,

    /// Config file path (defaults to .ossint.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Records that made it into the table, plus the per-PR failures seen on
/// the way.
#[derive(Debug)]
struct Summary {
    rows: Vec<PullRequestRecord>,
    failures: Vec<EnrichFailure>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.version {
        println!("ossint v{} (rev:{})", env!("CARGO_PKG_VERSION"), REVISION);
        return Ok(());
    }

    let username = cli
        .username
        .filter(|u| !u.is_empty())
        .ok_or(ConfigError::MissingUsername)?;

    info!("loading configuration");
    let config = Config::load(cli.config.as_deref())?;
    let token = config::resolve_token(
        cli.token,
        std::env::var("GITHUB_TOKEN").ok(),
        &config,
        config::gh_auth_token,
        &mut io::stderr(),
    )?;
    debug!(api_url = config.api_url(), "resolved GitHub credentials");

    let client = GitHubClient::new(config.api_url(), token);
    let summary = collect(&client, &username)
        .instrument(info_span!("ossint", username = %username))
        .await?;
    info!(
        rows = summary.rows.len(),
        failures = summary.failures.len(),
        "rendering table"
    );

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    report::render(&summary.rows, &mut stdout.lock(), color)?;

    Ok(())
}

/// Search, enrich, then filter and sort. Only the search can fail.
async fn collect(api: &dyn Fetch, username: &str) -> Result<Summary, Box<dyn std::error::Error>> {
    info!("searching pull requests");
    let mut records = pr::fetch_user_pull_requests(api, username)
        .await
        .map_err(|e| format!("error getting user PRs: {e}"))?;
    info!(found = records.len(), "enriching pull requests");

    let failures = pr::enrich(api, &mut records).await;
    let rows = report::select(records, username);

    Ok(Summary { rows, failures })
}
