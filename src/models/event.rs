//! Lenient extraction of typed events from webhook JSON.
//!
//! Webhook payloads are untrusted input: fields can be absent, null, or the
//! wrong shape depending on the event action and GitHub product. Extraction
//! therefore degrades missing fields to defaults instead of failing, and the
//! handlers decide what is usable.

use serde_json::Value;

use crate::models::summary::RepoCreated;

/// A push event as delivered in the webhook payload (no API enrichment).
#[derive(Debug, Clone, Default)]
pub struct PushEvent {
    pub repository: String,
    pub branch: String,
    pub pusher: String,
    pub commits: Vec<PushCommit>,
}

/// One commit entry from a push payload.
#[derive(Debug, Clone, Default)]
pub struct PushCommit {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub author_email: String,
    /// File paths listed in the payload, by change type.
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
}

impl PushCommit {
    /// Files touched according to the payload alone.
    pub fn files_touched(&self) -> i64 {
        (self.added.len() + self.removed.len() + self.modified.len()) as i64
    }
}

/// A pull request event as delivered in the webhook payload.
#[derive(Debug, Clone, Default)]
pub struct PrEvent {
    pub action: String,
    pub repository: String,
    pub number: u64,
    pub title: String,
    pub author: String,
    pub source_branch: String,
    pub target_branch: String,
    pub link: String,
    pub merged: bool,
}

/// A repository event as delivered in the webhook payload.
#[derive(Debug, Clone, Default)]
pub struct RepositoryEvent {
    pub action: String,
    pub repo: RepoCreated,
}

fn text(v: &Value) -> String {
    v.as_str().unwrap_or_default().to_string()
}

fn string_list(v: &Value) -> Vec<String> {
    v.as_array()
        .map(|items| items.iter().map(text).collect())
        .unwrap_or_default()
}

impl PushEvent {
    /// Extract a push event from a raw payload.
    pub fn from_payload(payload: &Value) -> Self {
        let branch = text(&payload["ref"])
            .strip_prefix("refs/heads/")
            .map(str::to_string)
            .unwrap_or_else(|| text(&payload["ref"]));

        let commits = payload["commits"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .map(|c| PushCommit {
                        sha: text(&c["id"]),
                        message: text(&c["message"]),
                        author: text(&c["author"]["name"]),
                        author_email: text(&c["author"]["email"]),
                        added: string_list(&c["added"]),
                        removed: string_list(&c["removed"]),
                        modified: string_list(&c["modified"]),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            repository: text(&payload["repository"]["name"]),
            branch,
            pusher: text(&payload["pusher"]["name"]),
            commits,
        }
    }
}

impl PrEvent {
    /// Extract a pull request event from a raw payload.
    pub fn from_payload(payload: &Value) -> Self {
        let pr = &payload["pull_request"];
        Self {
            action: text(&payload["action"]),
            repository: text(&payload["repository"]["name"]),
            number: pr["number"].as_u64().unwrap_or_default(),
            title: text(&pr["title"]),
            author: text(&pr["user"]["login"]),
            source_branch: text(&pr["head"]["ref"]),
            target_branch: text(&pr["base"]["ref"]),
            link: text(&pr["html_url"]),
            merged: pr["merged"].as_bool().unwrap_or_default(),
        }
    }
}

impl RepositoryEvent {
    /// Extract a repository event from a raw payload.
    pub fn from_payload(payload: &Value) -> Self {
        let repo = &payload["repository"];
        Self {
            action: text(&payload["action"]),
            repo: RepoCreated {
                name: text(&repo["name"]),
                created_by: payload["sender"]["login"]
                    .as_str()
                    .unwrap_or("Unknown")
                    .to_string(),
                created_at: text(&repo["created_at"]),
                description: text(&repo["description"]),
                language: text(&repo["language"]),
                private: repo["private"].as_bool().unwrap_or_default(),
                default_branch: text(&repo["default_branch"]),
                clone_url: text(&repo["clone_url"]),
                ssh_url: text(&repo["ssh_url"]),
            },
        }
    }
}
