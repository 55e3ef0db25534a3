//! Summary types derived from webhook payloads and API enrichment.

use serde::{Deserialize, Serialize};

/// Everything we report about a single commit in a push.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub author_email: String,
    pub repository: String,
    pub branch: String,
    /// Number of files touched by the commit.
    pub files_changed: i64,
    pub additions: i64,
    pub deletions: i64,
    /// Assembled per-file patch text ("Diff unavailable" when enrichment failed).
    pub diff: String,
}

/// Everything the Jira issue and the terminal report need about a PR.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrSummary {
    pub number: u64,
    pub title: String,
    pub repository: String,
    pub author: String,
    pub source_branch: String,
    pub target_branch: String,
    pub files_changed: Vec<String>,
    pub link: String,
    /// The webhook action (`opened`, `closed`, `synchronize`, or the
    /// synthesized `merged`).
    pub action: String,
}

/// Details of a newly created repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepoCreated {
    pub name: String,
    pub created_by: String,
    pub created_at: String,
    pub description: String,
    pub language: String,
    pub private: bool,
    pub default_branch: String,
    pub clone_url: String,
    pub ssh_url: String,
}
