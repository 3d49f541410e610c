//! CLI for the nixpkgs pull request tracker.
//!
//! Checks whether a pull request has reached the nixos/nixpkgs channel
//! branches, and keeps a persistent list of pull requests to re-check.

use clap::{Parser, Subcommand};
use nixpkgs_tracker::{
    load_token, normalize_identifier, save_token, ClientError, ConfigError, FileStore,
    GitHubClient, PullRequestNumber, Resolution, Resolver, StoreError, TrackerConfig,
    TrackingList,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directory name used under the platform config and data directories.
const APP_DIR: &str = "nixpkgs-tracker";

/// nixpkgs Pull Request Tracker - See which channels a pull request has reached.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the state file holding the token and tracked pull requests.
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// GitHub token. Overrides the stored token.
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the status of a pull request (number or URL, e.g. 449457).
    Check { pull_request: String },

    /// Track a pull request and check its status.
    Track { pull_request: String },

    /// Stop tracking a pull request.
    Untrack { pull_request: String },

    /// Check every tracked pull request.
    List,

    /// Manage the stored GitHub token.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand, Debug)]
enum TokenAction {
    /// Save a token (e.g. github_pat_...).
    Set { token: String },

    /// Remove the stored token.
    Clear,
}

/// Setup failures that prevent any command from running.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Whether the command did what was asked.
enum Outcome {
    Success,
    Failed,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // octocrab pulls in a second rustls provider; pick one explicitly.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    match run(args).await {
        Ok(Outcome::Success) => ExitCode::from(0),
        Ok(Outcome::Failed) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Log level is taken from `RUST_LOG` and defaults to "info". Upstream
/// errors are reported through this subscriber.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<Outcome, CliError> {
    let config_path = args
        .config
        .unwrap_or_else(|| default_dir(dirs::config_dir()).join("config.toml"));
    let state_path = args
        .state
        .unwrap_or_else(|| default_dir(dirs::data_dir()).join("state.json"));

    let config = TrackerConfig::load_or_default(&config_path)?;
    let mut store = FileStore::open(state_path)?;

    match args.command {
        Command::Token { action } => {
            match action {
                TokenAction::Set { token } => {
                    save_token(&mut store, &token)?;
                    info!(path = %store.path().display(), "GitHub token saved");
                }
                TokenAction::Clear => {
                    save_token(&mut store, "")?;
                    info!("GitHub token removed");
                }
            }
            Ok(Outcome::Success)
        }
        Command::Untrack { pull_request } => {
            let Some(number) = parse_number(&pull_request) else {
                return Ok(Outcome::Failed);
            };
            let mut tracking = TrackingList::load(&store)?;
            if tracking.untrack(number) {
                tracking.save(&mut store)?;
                info!(pr = %number, "No longer tracking pull request");
            } else {
                warn!(pr = %number, "Pull request was not tracked");
            }
            Ok(Outcome::Success)
        }
        Command::Check { pull_request } => {
            let resolver = build_resolver(&config, args.token, &store)?;
            match resolver.resolve(&pull_request).await {
                Ok(resolution) => {
                    print_resolution(&resolution, args.json);
                    Ok(Outcome::Success)
                }
                Err(e) => {
                    error!("{e}");
                    Ok(Outcome::Failed)
                }
            }
        }
        Command::Track { pull_request } => {
            let Some(number) = parse_number(&pull_request) else {
                return Ok(Outcome::Failed);
            };
            let mut tracking = TrackingList::load(&store)?;
            let resolver = build_resolver(&config, args.token, &store)?;

            match tracking.track_resolved(&resolver, number).await {
                Ok(true) => {
                    tracking.save(&mut store)?;
                    info!(pr = %number, "Tracking pull request");
                }
                Ok(false) => info!(pr = %number, "Pull request already tracked"),
                Err(e) => {
                    error!("{e}");
                    return Ok(Outcome::Failed);
                }
            }

            if let Some(resolution) = tracking.get(number).and_then(|e| e.resolution.as_ref()) {
                print_resolution(resolution, args.json);
            }
            Ok(Outcome::Success)
        }
        Command::List => {
            let mut tracking = TrackingList::load(&store)?;
            if tracking.is_empty() {
                println!("No tracked pull requests. Add one with `nixpkgs-tracker track <PR>`.");
                return Ok(Outcome::Success);
            }

            let resolver = build_resolver(&config, args.token, &store)?;
            let summary = tracking.refresh(&resolver, config.concurrency).await;
            for failure in &summary.failures {
                error!("{failure}");
            }

            print_tracking(&tracking, args.json);
            if summary.has_failures() {
                Ok(Outcome::Failed)
            } else {
                Ok(Outcome::Success)
            }
        }
    }
}

/// Builds the resolver, preferring the CLI/env token over the stored one.
fn build_resolver(
    config: &TrackerConfig,
    token: Option<String>,
    store: &FileStore,
) -> Result<Resolver, CliError> {
    let token = match token.filter(|t| !t.is_empty()) {
        Some(token) => Some(token),
        None => load_token(store)?,
    };
    if token.is_none() {
        info!("No GitHub token configured, requests are rate limited");
    }

    let client = GitHubClient::new(&config.upstream, token.as_deref())?;
    Ok(Resolver::new(Arc::new(client), config.branches.clone()))
}

fn parse_number(input: &str) -> Option<PullRequestNumber> {
    normalize_identifier(input)
        .map_err(|e| error!("{e}"))
        .ok()
}

fn default_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Prints a single resolution.
fn print_resolution(resolution: &Resolution, json: bool) {
    if json {
        match serde_json::to_string_pretty(resolution) {
            Ok(text) => println!("{text}"),
            Err(e) => error!(error = %e, "Failed to serialize result"),
        }
        return;
    }
    print_block(resolution);
}

/// Prints every tracked pull request, resolved or not.
fn print_tracking(tracking: &TrackingList, json: bool) {
    if json {
        match serde_json::to_string_pretty(tracking.entries()) {
            Ok(text) => println!("{text}"),
            Err(e) => error!(error = %e, "Failed to serialize result"),
        }
        return;
    }

    println!("Pull requests\n");
    for entry in tracking.entries() {
        match &entry.resolution {
            Some(resolution) => print_block(resolution),
            None => println!("#{} could not be loaded\n", entry.number),
        }
    }
}

fn print_block(resolution: &Resolution) {
    let record = &resolution.record;
    let lifecycle = record.lifecycle();

    println!("[{}] {} #{}", record.status_label(), record.title, record.number);
    println!(
        "  By {}, was {} on {}",
        record.author,
        lifecycle.verb(),
        lifecycle.at().format("%b %-d, %Y")
    );
    println!("  {}", record.html_url);

    if !record.is_open() {
        let width = resolution
            .comparisons
            .iter()
            .map(|c| c.branch.len())
            .max()
            .unwrap_or(0);
        for comparison in &resolution.comparisons {
            println!(
                "    {:<width$}  {}",
                comparison.branch,
                comparison.status,
                width = width
            );
        }
    }
    println!();
}
