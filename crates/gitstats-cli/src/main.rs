//! ggs - git stats for GitHub accounts
//!
//! Summarises GitHub activity for an account.
//!
//! ## Commands
//!
//! - `repo`: List repositories (all of them with a token, public ones by user name otherwise)
//! - `stats`: Show weekly additions/deletions for one repository
//! - `lines`: Total lines of code changed across every repository
//!
//! Set `GGS_TOKEN` to a personal access token to include private repositories.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gitstats_core::{ApiClient, Config, GithubApi, LinesAggregator};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "ggs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "GitHub code statistics for your repositories", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get all repositories
    #[command(visible_alias = "r")]
    Repo {
        /// GitHub user name (ignored when GGS_TOKEN is set)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Get stats of a specific repository
    #[command(visible_alias = "s")]
    Stats {
        /// Full repository name, <owner>/<repo>
        #[arg(short, long)]
        name: String,
    },

    /// Get lines of code you have written
    #[command(visible_alias = "l")]
    Lines {
        /// GitHub user name (ignored when GGS_TOKEN is set)
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    gitstats_core::init_tracing(cli.json, level);

    let config = Config::from_env().context("Failed to load configuration")?;
    debug!(
        base_url = %config.api_base_url,
        authenticated = config.has_token(),
        "configuration loaded"
    );
    let api = Arc::new(ApiClient::new(config.clone()).context("Failed to create GitHub client")?);

    match cli.command {
        Commands::Repo { name } => cmd_repo(api.as_ref(), &config, name.as_deref()).await,
        Commands::Stats { name } => cmd_stats(api.as_ref(), &name).await,
        Commands::Lines { name } => cmd_lines(api, &config, name.as_deref()).await,
    }
}

async fn cmd_repo(api: &dyn GithubApi, config: &Config, name: Option<&str>) -> Result<()> {
    let repositories = if config.has_token() {
        api.list_repositories_for_authenticated_user()
            .await
            .context("Failed to list repositories for the authenticated user")?
    } else if let Some(name) = name.filter(|n| !n.is_empty()) {
        api.list_public_repositories(name)
            .await
            .with_context(|| format!("Failed to list public repositories of {name}"))?
    } else {
        bail!("Token or user name is not given. Set GGS_TOKEN or pass --name.");
    };

    for repository in &repositories {
        println!("{repository}");
    }
    Ok(())
}

async fn cmd_stats(api: &dyn GithubApi, full_name: &str) -> Result<()> {
    if full_name.is_empty() {
        bail!("--name must be <owner>/<repo>");
    }

    let frequencies = api
        .weekly_commit_activity(full_name)
        .await
        .with_context(|| format!("Failed to get statistics of {full_name}"))?;

    println!("{:<30}\t{:<10}\t{:<5}", "Start Time", "Additions", "Deletions");
    for frequency in &frequencies {
        let start = frequency
            .week_start()
            .map(|t| t.to_string())
            .unwrap_or_else(|| frequency.time.to_string());
        println!(
            "{:<30}\t{:>10}\t{:>5}",
            start, frequency.additions, frequency.deletions
        );
    }
    Ok(())
}

async fn cmd_lines(api: Arc<ApiClient>, config: &Config, name: Option<&str>) -> Result<()> {
    let total = LinesAggregator::new(api, config)
        .compute_total_lines(name)
        .await
        .context("Failed to list repositories")?;

    println!("{total}");
    Ok(())
}
