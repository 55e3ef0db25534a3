//! Pull request event handling.
//!
//! Org hooks get a one-line notice. Repo hooks fetch the PR with its files
//! and reviews, report it, and drive the Jira issue lifecycle:
//!
//! - `opened` creates an issue in the open-PR status
//! - `closed` with `merged: true` transitions the issue to the merged status
//! - `synchronize` keeps the existing issue untouched
//!
//! Jira being unconfigured disables the sync but not the reporting.

use crate::events::{EventContext, Outcome};
use crate::jira::JiraClient;
use crate::models::{PrEvent, PrSummary};
use crate::report;

/// Org-scope handling: acknowledge the PR event without enrichment.
pub fn handle_brief(event: &PrEvent) -> String {
    tracing::info!(
        action = %event.action,
        number = event.number,
        "pull request event"
    );
    report::pr_brief_line(&PrSummary {
        number: event.number,
        title: event.title.clone(),
        action: event.action.clone(),
        ..PrSummary::default()
    })
}

/// Repo-scope handling: enrich, report, and sync to Jira.
pub async fn handle_detailed(event: &PrEvent, ctx: &EventContext<'_>) -> Outcome {
    let mut outcome = Outcome::default();

    tracing::info!(
        action = %event.action,
        repo = %event.repository,
        number = event.number,
        author = %event.author,
        "detailed pull request event"
    );

    let summary = PrSummary {
        number: event.number,
        title: event.title.clone(),
        repository: event.repository.clone(),
        author: event.author.clone(),
        source_branch: event.source_branch.clone(),
        target_branch: event.target_branch.clone(),
        files_changed: Vec::new(),
        link: event.link.clone(),
        action: event.action.clone(),
    };

    if ctx.dry_run {
        outcome.report.push_str(&report::pr_brief_line(&summary));
        log_sync_decision(event, ctx.jira.is_some());
        return outcome;
    }

    let details = match ctx.github.pr_details(&event.repository, event.number).await {
        Ok(details) => details,
        Err(e) => {
            tracing::error!(number = event.number, "failed to get PR details: {e}");
            outcome.errors += 1;
            return outcome;
        }
    };

    let summary = PrSummary {
        files_changed: details.files.iter().map(|f| f.filename.clone()).collect(),
        ..summary
    };

    if let Some(jira) = ctx.jira {
        sync_to_jira(event, &summary, jira, &mut outcome).await;
    }

    outcome
        .report
        .push_str(&report::pr_block(&event.action, &details));

    outcome
}

/// Drive the Jira issue lifecycle for one PR event.
async fn sync_to_jira(
    event: &PrEvent,
    summary: &PrSummary,
    jira: &JiraClient,
    outcome: &mut Outcome,
) {
    match event.action.as_str() {
        "opened" => {
            tracing::info!(
                number = event.number,
                repo = %event.repository,
                "creating Jira issue for PR"
            );
            match jira.create_pr_issue(summary).await {
                Ok(issue) => {
                    tracing::info!(issue = %issue.key, number = event.number, "created Jira issue");
                    outcome
                        .report
                        .push_str(&format!("Created Jira issue: {} for PR #{}\n", issue.key, event.number));
                }
                Err(e) => {
                    tracing::error!("failed to create Jira issue: {e}");
                    outcome.errors += 1;
                }
            }
        }
        "closed" if event.merged => {
            tracing::info!(number = event.number, "moving PR issue to merged status");
            match jira.move_pr_to_merged(event.number).await {
                Ok(()) => {
                    outcome
                        .report
                        .push_str(&format!("Moved PR #{} issue to merged status\n", event.number));
                }
                Err(e) => {
                    tracing::error!("failed to move PR issue to merged: {e}");
                    outcome.errors += 1;
                }
            }
        }
        "synchronize" => {
            tracing::info!(
                number = event.number,
                "PR updated - keeping existing Jira issue"
            );
        }
        _ => {}
    }
}

/// In dry-run mode the sync is skipped; log what would have happened.
fn log_sync_decision(event: &PrEvent, jira_configured: bool) {
    if !jira_configured {
        tracing::info!("Jira not configured - skipping issue sync");
        return;
    }
    match event.action.as_str() {
        "opened" => tracing::info!(number = event.number, "dry-run: would create Jira issue"),
        "closed" if event.merged => {
            tracing::info!(number = event.number, "dry-run: would move issue to merged status");
        }
        _ => {}
    }
}
