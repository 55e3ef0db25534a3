//! octosync — bridge GitHub webhook events to Jira and the terminal.
//!
//! Entry point and error handling boundary. Uses `anyhow` for ergonomic
//! error propagation and user-facing messages; operational detail goes to
//! stderr through `tracing`.

mod cli;

use std::path::Path;
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;

use octosync::config::Config;
use octosync::constants;
use octosync::env::Env;
use octosync::events;
use octosync::github::GithubClient;
use octosync::jira::JiraClient;
use octosync::models::EventKind;

use cli::args::{Cli, Command, InstallHookArgs, ProcessArgs};

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Process(args) => run_process(args).await,
        Command::InstallHook(args) => run_install_hook(args).await,
        Command::Check => run_check(),
        Command::Version => run_version(),
    }
}

/// Print version information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!("{} {}", constants::APP_NAME.bold(), constants::VERSION.green().bold());
    Ok(())
}

/// Validate configuration and report what is enabled.
fn run_check() -> Result<()> {
    use colored::Colorize;

    let config = load_config()?;

    let github = config.github();
    match &github {
        Ok(gh) => println!(
            "  {} GitHub: org {} via {}",
            "✔".green().bold(),
            gh.org.bold(),
            gh.api_url,
        ),
        Err(e) => println!("  {} GitHub: {e}", "✖".red().bold()),
    }

    match config.jira() {
        Some(jira) => println!(
            "  {} Jira: project {} at {}",
            "✔".green().bold(),
            jira.project_key.bold(),
            jira.base_url,
        ),
        None => println!(
            "  {} Jira: not configured - issue sync disabled",
            "ℹ".dimmed(),
        ),
    }

    match config.webhook.callback_url {
        Some(ref url) => println!("  {} Callback URL: {url}", "✔".green().bold()),
        None => println!(
            "  {} Callback URL: not set - webhook installation disabled",
            "ℹ".dimmed(),
        ),
    }

    if github.is_err() {
        bail!("required GitHub settings are missing");
    }
    Ok(())
}

/// Process one webhook event payload.
async fn run_process(args: ProcessArgs) -> Result<()> {
    let config = load_config()?;

    let github_config = config.github()?;
    let github = GithubClient::new(&github_config)?;

    let jira = match config.jira() {
        Some(jira_config) => match JiraClient::new(&jira_config) {
            Ok(client) => {
                tracing::info!("Jira integration enabled");
                Some(client)
            }
            Err(e) => {
                tracing::warn!("Jira client initialization failed: {e} (continuing without Jira)");
                None
            }
        },
        None => {
            tracing::info!("Jira configuration missing - running without issue sync");
            None
        }
    };

    let kind = args
        .event
        .parse::<EventKind>()
        .unwrap_or_else(|_| EventKind::Other(args.event.clone()));

    let payload_text = read_payload(&args.payload).await?;
    let payload: serde_json::Value =
        serde_json::from_str(&payload_text).context("invalid JSON payload")?;

    let ctx = events::EventContext {
        github: &github,
        jira: jira.as_ref(),
        callback_url: config.webhook.callback_url.as_deref(),
        dry_run: args.dry_run,
    };

    let outcome = events::route(args.scope, &kind, &payload, &ctx).await;
    print!("{}", outcome.report);

    if outcome.errors > 0 {
        bail!(
            "{} step(s) failed while processing the event - output is incomplete",
            outcome.errors,
        );
    }
    Ok(())
}

/// Install the callback webhook on a repository.
async fn run_install_hook(args: InstallHookArgs) -> Result<()> {
    use colored::Colorize;

    let config = load_config()?;
    let github_config = config.github()?;
    let github = GithubClient::new(&github_config)?;

    let url = args
        .url
        .or(config.webhook.callback_url)
        .context("no delivery URL: pass --url or configure webhook.callback_url")?;

    // Resolve the repository first so a typo fails before the hook call.
    let repo = github
        .get_repository(&args.repo)
        .await
        .with_context(|| format!("repository {}/{} not found", github.org(), args.repo))?;

    github
        .create_repo_webhook(&repo.name, &url)
        .await
        .with_context(|| format!("failed to install webhook on {}", repo.name))?;

    println!(
        "  {} Installed webhook on {}/{} delivering to {url}",
        "✔".green().bold(),
        github.org(),
        repo.name.bold(),
    );
    Ok(())
}

fn load_config() -> Result<Config> {
    Config::load(Some(Path::new(".")), &Env::process()).context("failed to load configuration")
}

/// Read the payload file, or stdin when the path is `-`.
async fn read_payload(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        use tokio::io::AsyncReadExt;
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("failed to read payload from stdin")?;
        Ok(buffer)
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read payload file {}", path.display()))
    }
}
