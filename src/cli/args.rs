//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

use octosync::constants;
use octosync::models::Scope;

/// Bridge GitHub webhook events to Jira and the terminal.
#[derive(Parser, Debug)]
#[command(name = "octosync", version = constants::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Process one webhook event payload.
    Process(ProcessArgs),

    /// Install the callback webhook on a repository.
    InstallHook(InstallHookArgs),

    /// Validate configuration and report what is enabled.
    Check,

    /// Print version information.
    Version,
}

/// Arguments for the `process` subcommand.
///
/// Defaults match how GitHub Actions delivers an event: the event name in
/// `GITHUB_EVENT_NAME` and the payload path in `GITHUB_EVENT_PATH`.
#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// GitHub event name (push, pull_request, repository, ping, ...).
    #[arg(long, env = constants::ENV_EVENT_NAME)]
    pub event: String,

    /// Path to the JSON payload file, or `-` to read stdin.
    #[arg(long, env = constants::ENV_EVENT_PATH)]
    pub payload: PathBuf,

    /// Which hook the event arrived on.
    #[arg(long, value_enum, default_value_t = Scope::Repo)]
    pub scope: Scope,

    /// Parse, route, and report without any remote API calls.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Arguments for the `install-hook` subcommand.
#[derive(Parser, Debug)]
pub struct InstallHookArgs {
    /// Repository name within the configured organization.
    pub repo: String,

    /// Delivery URL for the webhook (default: the configured callback URL).
    #[arg(long)]
    pub url: Option<String>,
}
