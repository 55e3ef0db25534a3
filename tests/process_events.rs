//! Integration tests for event processing.
//!
//! These tests exercise the routing and handlers that back the `process`
//! command through the library API, in dry-run mode so no network is
//! touched. Payloads come from fixture files with the shapes GitHub
//! actually delivers.

use std::str::FromStr;

use octosync::config::{Config, GithubConfig};
use octosync::env::Env;
use octosync::events::{self, EventContext};
use octosync::github::GithubClient;
use octosync::models::{EventKind, PushEvent, Scope};

fn fixture(name: &str) -> serde_json::Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn github_client() -> GithubClient {
    GithubClient::new(&GithubConfig {
        token: "test-token".to_string(),
        org: "acme".to_string(),
        api_url: "https://api.github.example".to_string(),
    })
    .unwrap()
}

async fn route_dry_run(scope: Scope, kind: &str, payload: &serde_json::Value) -> events::Outcome {
    let github = github_client();
    let ctx = EventContext {
        github: &github,
        jira: None,
        callback_url: Some("https://hooks.example.com/github"),
        dry_run: true,
    };
    let kind = EventKind::from_str(kind).unwrap();
    events::route(scope, &kind, payload, &ctx).await
}

// ---------------------------------------------------------------------------
// push
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repo_push_reports_each_commit_and_rollup() {
    let outcome = route_dry_run(Scope::Repo, "push", &fixture("push.json")).await;

    assert_eq!(outcome.errors, 0);
    assert!(outcome.report.contains("COMMIT #1"));
    assert!(outcome.report.contains("COMMIT #2"));
    assert!(outcome.report.contains("Author: Ada Lovelace <ada@example.com>"));
    assert!(outcome.report.contains("Branch: main"));
    assert!(outcome.report.contains("PUSH widgets@main: 2 commit(s)"));
}

#[tokio::test]
async fn repo_push_dry_run_counts_files_from_payload() {
    let outcome = route_dry_run(Scope::Repo, "push", &fixture("push.json")).await;

    // First commit touches src/validate.rs + src/lib.rs per the payload.
    assert!(outcome.report.contains("Files Changed: 2"));
    // No API enrichment, so no diff sections.
    assert!(!outcome.report.contains("FILE DIFF CONTENT"));
}

#[tokio::test]
async fn org_push_gets_brief_notice() {
    let outcome = route_dry_run(Scope::Org, "push", &fixture("push.json")).await;

    assert_eq!(outcome.errors, 0);
    assert_eq!(
        outcome.report,
        "Push event detected in repo: widgets by ada\n"
    );
}

#[tokio::test]
async fn push_payload_extraction_matches_fixture() {
    let event = PushEvent::from_payload(&fixture("push.json"));
    assert_eq!(event.repository, "widgets");
    assert_eq!(event.branch, "main");
    assert_eq!(event.commits.len(), 2);
    assert_eq!(event.commits[1].author, "Grace Hopper");
}

// ---------------------------------------------------------------------------
// pull_request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repo_pr_opened_dry_run_reports_summary() {
    let outcome = route_dry_run(
        Scope::Repo,
        "pull_request",
        &fixture("pull_request_opened.json"),
    )
    .await;

    assert_eq!(outcome.errors, 0);
    assert!(outcome
        .report
        .contains("PR event: opened - #42: Add retry logic to the uploader"));
}

#[tokio::test]
async fn repo_pr_merged_dry_run_completes_without_errors() {
    let outcome = route_dry_run(
        Scope::Repo,
        "pull_request",
        &fixture("pull_request_merged.json"),
    )
    .await;

    assert_eq!(outcome.errors, 0);
    assert!(outcome.report.contains("closed"));
}

#[tokio::test]
async fn org_pr_gets_brief_notice() {
    let outcome = route_dry_run(
        Scope::Org,
        "pull_request",
        &fixture("pull_request_opened.json"),
    )
    .await;

    assert_eq!(
        outcome.report,
        "PR event: opened - #42: Add retry logic to the uploader\n"
    );
}

// ---------------------------------------------------------------------------
// repository
// ---------------------------------------------------------------------------

#[tokio::test]
async fn org_repository_created_reports_banner() {
    let outcome = route_dry_run(
        Scope::Org,
        "repository",
        &fixture("repository_created.json"),
    )
    .await;

    assert_eq!(outcome.errors, 0);
    assert!(outcome.report.contains("NEW REPOSITORY CREATED"));
    assert!(outcome.report.contains("Repository Name: new-service"));
    assert!(outcome.report.contains("Created By: ada"));
    assert!(outcome.report.contains("Language: Rust"));
}

#[tokio::test]
async fn org_repository_non_created_action_is_ignored() {
    let mut payload = fixture("repository_created.json");
    payload["action"] = serde_json::json!("archived");

    let outcome = route_dry_run(Scope::Org, "repository", &payload).await;
    assert_eq!(outcome.errors, 0);
    assert!(outcome.report.is_empty());
}

#[tokio::test]
async fn repo_scope_repository_event_is_acknowledged_only() {
    let outcome = route_dry_run(
        Scope::Repo,
        "repository",
        &fixture("repository_created.json"),
    )
    .await;

    assert_eq!(outcome.report, "Received repo-level event: repository\n");
}

// ---------------------------------------------------------------------------
// ping and unknown events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_acknowledges_hook_setup() {
    let outcome = route_dry_run(Scope::Org, "ping", &fixture("ping.json")).await;
    assert!(outcome
        .report
        .contains("org webhook setup successful"));

    let outcome = route_dry_run(Scope::Repo, "ping", &fixture("ping.json")).await;
    assert!(outcome
        .report
        .contains("repo webhook setup successful"));
}

#[tokio::test]
async fn unknown_event_kinds_are_acknowledged() {
    let outcome = route_dry_run(Scope::Repo, "release", &serde_json::json!({})).await;
    assert_eq!(outcome.report, "Received repo-level event: release\n");

    let outcome = route_dry_run(Scope::Org, "workflow_run", &serde_json::json!({})).await;
    assert_eq!(outcome.report, "Received org-level event: workflow_run\n");
}

// ---------------------------------------------------------------------------
// configuration wiring
// ---------------------------------------------------------------------------

#[test]
fn config_resolves_clients_for_processing() {
    let env = Env::fixed(&[
        ("GITHUB_TOKEN", "t"),
        ("GITHUB_ORG", "acme"),
        ("JIRA_BASE_URL", "https://acme.atlassian.net"),
        ("JIRA_EMAIL", "bot@acme.dev"),
        ("JIRA_API_TOKEN", "s"),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(Some(dir.path()), &env).unwrap();

    let github = config.github().unwrap();
    assert_eq!(github.org, "acme");

    let jira = config.jira().unwrap();
    assert_eq!(jira.base_url, "https://acme.atlassian.net");
    assert_eq!(jira.project_key, "REP");
}
