//! Push event handling.
//!
//! Org hooks get a one-line notice. Repo hooks get the detailed treatment:
//! each commit in the payload is enriched through the commits API (stats
//! and per-file patches) and reported individually, followed by a rollup
//! of total and net line changes. One commit's enrichment failure is
//! logged and does not abort the remaining commits.

use crate::events::{EventContext, Outcome};
use crate::github::format_commit_diff;
use crate::models::{CommitSummary, PushCommit, PushEvent};
use crate::report;

/// Org-scope handling: acknowledge the push without enrichment.
pub fn handle_brief(event: &PushEvent) -> String {
    tracing::info!(
        repo = %event.repository,
        pusher = %event.pusher,
        "push event detected"
    );
    format!(
        "Push event detected in repo: {} by {}\n",
        event.repository, event.pusher
    )
}

/// Repo-scope handling: enrich and report every commit of the push.
pub async fn handle_detailed(event: &PushEvent, ctx: &EventContext<'_>) -> Outcome {
    let mut outcome = Outcome::default();

    tracing::info!(
        repo = %event.repository,
        branch = %event.branch,
        pusher = %event.pusher,
        commits = event.commits.len(),
        "detailed push event"
    );

    if event.commits.is_empty() {
        tracing::error!("no commits found in push payload");
        outcome.errors += 1;
        return outcome;
    }

    let mut summaries = Vec::with_capacity(event.commits.len());
    for commit in &event.commits {
        match summarize_commit(event, commit, ctx).await {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                tracing::error!(sha = %commit.sha, "failed to get commit details: {e}");
                outcome.errors += 1;
            }
        }
    }

    for (i, summary) in summaries.iter().enumerate() {
        outcome.report.push_str(&report::commit_block(i + 1, summary));
        outcome.report.push('\n');
    }
    outcome
        .report
        .push_str(&report::push_rollup(&event.repository, &event.branch, &summaries));

    outcome
}

/// Build a commit summary: payload fields plus API stats and diff text.
/// In dry-run mode the payload alone is used and the diff is omitted.
async fn summarize_commit(
    event: &PushEvent,
    commit: &PushCommit,
    ctx: &EventContext<'_>,
) -> Result<CommitSummary, crate::github::GithubError> {
    let mut summary = CommitSummary {
        sha: commit.sha.clone(),
        message: commit.message.clone(),
        author: commit.author.clone(),
        author_email: commit.author_email.clone(),
        repository: event.repository.clone(),
        branch: event.branch.clone(),
        files_changed: commit.files_touched(),
        ..CommitSummary::default()
    };

    if ctx.dry_run {
        return Ok(summary);
    }

    let details = ctx.github.get_commit(&event.repository, &commit.sha).await?;
    summary.files_changed = details.files.len() as i64;
    summary.additions = details.stats.additions;
    summary.deletions = details.stats.deletions;
    summary.diff = format_commit_diff(&details);

    Ok(summary)
}
