//! Repository event handling: the new-repository automation.
//!
//! Only the `created` action is processed. The new repository gets a full
//! banner report, and the configured callback webhook is installed on it so
//! its own push and PR events start flowing without manual setup.

use crate::events::{EventContext, Outcome};
use crate::models::RepositoryEvent;
use crate::report;

pub async fn handle(event: &RepositoryEvent, ctx: &EventContext<'_>) -> Outcome {
    let mut outcome = Outcome::default();

    if event.action != "created" {
        tracing::debug!(action = %event.action, "ignoring repository event");
        return outcome;
    }

    tracing::info!(repo = %event.repo.name, by = %event.repo.created_by, "new repository created");
    outcome.report.push_str(&report::repo_created_block(&event.repo));

    if ctx.dry_run {
        tracing::info!(repo = %event.repo.name, "dry-run: would install webhook");
        return outcome;
    }

    let Some(callback_url) = ctx.callback_url else {
        tracing::warn!(
            repo = %event.repo.name,
            "no callback URL configured - skipping webhook installation"
        );
        return outcome;
    };

    match ctx
        .github
        .create_repo_webhook(&event.repo.name, callback_url)
        .await
    {
        Ok(()) => {
            tracing::info!(repo = %event.repo.name, "installed webhook on new repository");
            outcome
                .report
                .push_str(&format!("Installed webhook on new repo: {}\n", event.repo.name));
        }
        Err(e) => {
            tracing::error!(repo = %event.repo.name, "failed to install webhook: {e}");
            outcome.errors += 1;
        }
    }

    outcome
}
