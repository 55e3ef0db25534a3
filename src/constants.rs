//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! API defaults, and the Jira workflow vocabulary so a rename only requires
//! changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "octosync";

/// CLI version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `User-Agent` sent with every API request (GitHub rejects requests without one).
pub const USER_AGENT: &str = concat!("octosync/", env!("CARGO_PKG_VERSION"));

/// Local config filename (e.g. `octosync.toml` in the working directory).
pub const CONFIG_FILENAME: &str = "octosync.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "octosync";

/// Default GitHub REST API base URL (override for GitHub Enterprise).
pub const GITHUB_API_URL: &str = "https://api.github.com";


// ── Environment variable names ──────────────────────────────────────

pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_GITHUB_ORG: &str = "GITHUB_ORG";
pub const ENV_GITHUB_API_URL: &str = "GITHUB_API_URL";
pub const ENV_JIRA_BASE_URL: &str = "JIRA_BASE_URL";
pub const ENV_JIRA_EMAIL: &str = "JIRA_EMAIL";
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const ENV_JIRA_PROJECT_KEY: &str = "JIRA_PROJECT_KEY";
pub const ENV_CALLBACK_URL: &str = "OCTOSYNC_CALLBACK_URL";

/// Set by GitHub Actions: the name of the event that triggered the run.
pub const ENV_EVENT_NAME: &str = "GITHUB_EVENT_NAME";

/// Set by GitHub Actions: path to the JSON file with the event payload.
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";


// ── Webhook installation ────────────────────────────────────────────

/// Events subscribed when installing a repository webhook.
pub const HOOK_EVENTS: &[&str] = &[
    "push",
    "pull_request",
    "issues",
    "repository",
    "release",
    "commit_comment",
];


// ── Jira PR lifecycle ───────────────────────────────────────────────

/// Workflow status for a freshly opened pull request.
pub const STATUS_OPEN_PR: &str = "Open_PR";

/// Workflow status for a merged pull request.
pub const STATUS_MERGED_PR: &str = "Merged_PR";

/// Default Jira project key for PR issues.
pub const DEFAULT_PROJECT_KEY: &str = "REP";

/// Label applied to every issue created from a pull request.
pub const LABEL_GITHUB_PR: &str = "github-pr";

/// Label that ties an issue to a specific PR number.
pub fn pr_label(number: u64) -> String {
    format!("pr-{number}")
}
