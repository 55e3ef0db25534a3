//! Terminal report blocks for processed events.
//!
//! Pure string builders so the formatting is testable; the CLI prints the
//! result. Layouts follow the operational reports the tool has always
//! produced: a banner block for new repositories, a per-commit block for
//! pushes, and a detail block for pull requests.

use colored::Colorize;

use crate::calculator;
use crate::github::PrDetails;
use crate::models::{CommitSummary, PrSummary, RepoCreated};

/// Banner block for a newly created repository.
pub fn repo_created_block(repo: &RepoCreated) -> String {
    let rule = "=".repeat(80);
    let mut out = String::new();

    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("{}\n", "NEW REPOSITORY CREATED".bold()));
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("Repository Name: {}\n", repo.name));
    out.push_str(&format!("Created By: {}\n", repo.created_by));
    out.push_str(&format!("Created At: {}\n", repo.created_at));
    out.push_str(&format!("Description: {}\n", repo.description));
    out.push_str(&format!("Language: {}\n", repo.language));
    out.push_str(&format!("Private: {}\n", repo.private));
    out.push_str(&format!("Default Branch: {}\n", repo.default_branch));
    out.push_str(&format!("Clone URL: {}\n", repo.clone_url));
    out.push_str(&format!("SSH URL: {}\n", repo.ssh_url));
    out.push_str(&format!("{rule}\n"));

    out
}

/// Detail block for one commit of a push.
pub fn commit_block(index: usize, commit: &CommitSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", format!("COMMIT #{index}").bold()));
    out.push_str(&format!("  SHA: {}\n", commit.sha));
    out.push_str(&format!("  Message: {}\n", commit.message));
    out.push_str(&format!(
        "  Author: {} <{}>\n",
        commit.author, commit.author_email
    ));
    out.push_str(&format!("  Repository: {}\n", commit.repository));
    out.push_str(&format!("  Branch: {}\n", commit.branch));
    out.push_str(&format!("  Files Changed: {}\n", commit.files_changed));
    out.push_str(&format!(
        "  Lines: +{}/-{}\n",
        commit.additions, commit.deletions
    ));

    if !commit.diff.is_empty() {
        let rule = "-".repeat(60);
        out.push_str("  FILE DIFF CONTENT:\n");
        out.push_str(&format!("{rule}\n"));
        out.push_str(&commit.diff);
        if !commit.diff.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&format!("{rule}\n"));
    }

    out
}

/// Rollup line for a whole push: commit count, total added and removed
/// lines, and the net delta.
pub fn push_rollup(repository: &str, branch: &str, commits: &[CommitSummary]) -> String {
    let mut additions: i64 = 0;
    let mut deletions: i64 = 0;
    for commit in commits {
        additions = calculator::add(additions, commit.additions);
        deletions = calculator::add(deletions, commit.deletions);
    }
    let net = calculator::subtract(additions, deletions);
    let sign = if net >= 0 { "+" } else { "" };

    format!(
        "PUSH {repository}@{branch}: {} commit(s), +{additions}/-{deletions} (net {sign}{net})\n",
        commits.len(),
    )
}

/// Detail block for a pull request, including changed files and reviews.
pub fn pr_block(action: &str, details: &PrDetails) -> String {
    let pr = &details.pull_request;
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n",
        format!("PULL REQUEST {}", action.to_uppercase()).bold()
    ));
    out.push_str(&format!("  Title: {}\n", pr.title));
    out.push_str(&format!("  Number: #{}\n", pr.number));
    out.push_str(&format!("  Author: {}\n", pr.user.login));
    out.push_str(&format!("  State: {}\n", pr.state));
    out.push_str(&format!("  Source Branch: {}\n", pr.head.name));
    out.push_str(&format!("  Target Branch: {}\n", pr.base.name));
    out.push_str(&format!("  Files Changed: {}\n", details.files.len()));
    out.push_str(&format!("  Reviews: {}\n", details.reviews.len()));

    if !details.files.is_empty() {
        out.push_str("  CHANGED FILES:\n");
        for (i, file) in details.files.iter().enumerate() {
            out.push_str(&format!(
                "    {}. {} (+{}/-{}) [{}]\n",
                i + 1,
                file.filename,
                file.additions,
                file.deletions,
                file.status
            ));
        }
    }

    out
}

/// One-line summary for a brief (org-scope) pull request event.
pub fn pr_brief_line(pr: &PrSummary) -> String {
    format!(
        "PR event: {} - #{}: {}\n",
        pr.action, pr.number, pr.title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Account, BranchRef, FileChange, PullRequest, Review};

    fn commit(additions: i64, deletions: i64) -> CommitSummary {
        CommitSummary {
            sha: "abc123def456".to_string(),
            message: "tighten validation".to_string(),
            author: "Ada".to_string(),
            author_email: "ada@example.com".to_string(),
            repository: "widgets".to_string(),
            branch: "main".to_string(),
            files_changed: 2,
            additions,
            deletions,
            diff: String::new(),
        }
    }

    #[test]
    fn repo_created_block_lists_details() {
        let block = repo_created_block(&RepoCreated {
            name: "new-service".to_string(),
            created_by: "ada".to_string(),
            private: true,
            default_branch: "main".to_string(),
            ..RepoCreated::default()
        });

        assert!(block.contains("Repository Name: new-service"));
        assert!(block.contains("Created By: ada"));
        assert!(block.contains("Private: true"));
        assert!(block.contains("Default Branch: main"));
    }

    #[test]
    fn commit_block_shows_author_and_lines() {
        let block = commit_block(1, &commit(10, 4));
        assert!(block.contains("SHA: abc123def456"));
        assert!(block.contains("Author: Ada <ada@example.com>"));
        assert!(block.contains("Lines: +10/-4"));
        assert!(!block.contains("FILE DIFF CONTENT"), "no diff section without diff text");
    }

    #[test]
    fn commit_block_includes_diff_when_present() {
        let mut c = commit(1, 0);
        c.diff = "=== COMMIT DIFF: abc123de ===".to_string();
        let block = commit_block(2, &c);
        assert!(block.contains("FILE DIFF CONTENT"));
        assert!(block.contains("COMMIT DIFF"));
    }

    #[test]
    fn push_rollup_totals_and_net() {
        let line = push_rollup("widgets", "main", &[commit(10, 4), commit(5, 20)]);
        assert!(line.contains("2 commit(s)"));
        assert!(line.contains("+15/-24"));
        assert!(line.contains("net -9"));
    }

    #[test]
    fn push_rollup_positive_net_gets_plus_sign() {
        let line = push_rollup("widgets", "main", &[commit(7, 2)]);
        assert!(line.contains("net +5"));
    }

    #[test]
    fn push_rollup_empty_push() {
        let line = push_rollup("widgets", "main", &[]);
        assert!(line.contains("0 commit(s)"));
        assert!(line.contains("+0/-0"));
        assert!(line.contains("net +0"));
    }

    #[test]
    fn pr_block_lists_files_and_reviews() {
        let details = PrDetails {
            pull_request: PullRequest {
                number: 7,
                title: "Add frobnicator".to_string(),
                state: "open".to_string(),
                user: Account {
                    login: "grace".to_string(),
                },
                head: BranchRef {
                    name: "feature/frob".to_string(),
                },
                base: BranchRef {
                    name: "main".to_string(),
                },
                html_url: String::new(),
            },
            files: vec![FileChange {
                filename: "src/frob.rs".to_string(),
                status: "added".to_string(),
                additions: 120,
                deletions: 0,
                patch: None,
            }],
            reviews: vec![Review {
                user: Account {
                    login: "ada".to_string(),
                },
                state: "APPROVED".to_string(),
            }],
        };

        let block = pr_block("opened", &details);
        assert!(block.contains("PULL REQUEST OPENED"));
        assert!(block.contains("Number: #7"));
        assert!(block.contains("Source Branch: feature/frob"));
        assert!(block.contains("Files Changed: 1"));
        assert!(block.contains("1. src/frob.rs (+120/-0) [added]"));
        assert!(block.contains("Reviews: 1"));
    }

    #[test]
    fn pr_brief_line_format() {
        let line = pr_brief_line(&PrSummary {
            number: 3,
            title: "Fix typo".to_string(),
            action: "opened".to_string(),
            ..PrSummary::default()
        });
        assert_eq!(line, "PR event: opened - #3: Fix typo\n");
    }
}
