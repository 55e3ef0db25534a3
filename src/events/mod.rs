//! Webhook event routing.
//!
//! Events arrive with a scope (which hook delivered them) and a kind (the
//! GitHub event name). Organization hooks get brief handling plus the
//! new-repository automation; repository hooks get the detailed handlers
//! with API enrichment and Jira sync.

pub mod pull_request;
pub mod push;
pub mod repository;

use serde_json::Value;

use crate::github::GithubClient;
use crate::jira::JiraClient;
use crate::models::{EventKind, PrEvent, PushEvent, RepositoryEvent, Scope};

/// Shared handler dependencies for one event.
pub struct EventContext<'a> {
    pub github: &'a GithubClient,
    pub jira: Option<&'a JiraClient>,
    /// Public delivery URL to install on newly created repositories.
    pub callback_url: Option<&'a str>,
    /// Parse, route, and report without any remote API calls.
    pub dry_run: bool,
}

/// What processing one event produced: the rendered report plus how many
/// per-item failures were logged along the way.
#[derive(Debug, Default)]
pub struct Outcome {
    pub report: String,
    pub errors: usize,
}

impl Outcome {
    fn from_report(report: String) -> Self {
        Self { report, errors: 0 }
    }
}

/// Dispatch one event to its handler.
pub async fn route(
    scope: Scope,
    kind: &EventKind,
    payload: &Value,
    ctx: &EventContext<'_>,
) -> Outcome {
    match (scope, kind) {
        (Scope::Org, EventKind::Repository) => {
            repository::handle(&RepositoryEvent::from_payload(payload), ctx).await
        }
        (Scope::Org, EventKind::Push) => {
            Outcome::from_report(push::handle_brief(&PushEvent::from_payload(payload)))
        }
        (Scope::Org, EventKind::PullRequest) => {
            Outcome::from_report(pull_request::handle_brief(&PrEvent::from_payload(payload)))
        }
        (Scope::Repo, EventKind::Push) => {
            push::handle_detailed(&PushEvent::from_payload(payload), ctx).await
        }
        (Scope::Repo, EventKind::PullRequest) => {
            pull_request::handle_detailed(&PrEvent::from_payload(payload), ctx).await
        }
        (scope, EventKind::Ping) => {
            tracing::info!("ping received on {scope} hook");
            Outcome::from_report(format!(
                "Received ping event from GitHub - {scope} webhook setup successful!\n"
            ))
        }
        (scope, kind) => {
            tracing::info!("received {scope}-level event: {kind}");
            Outcome::from_report(format!("Received {scope}-level event: {kind}\n"))
        }
    }
}
