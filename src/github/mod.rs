//! GitHub REST v3 client scoped to a single organization.
//!
//! Covers the calls the event handlers need: installing repository
//! webhooks, fetching commit details with per-file patches, and fetching
//! pull request details, changed files, and reviews. Non-success responses
//! surface as typed errors carrying the status and response body.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::GithubConfig;
use crate::constants;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from GitHub API calls.
#[derive(Error, Debug)]
pub enum GithubError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("GitHub API returned HTTP {status} for {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },
}

/// Commit statistics as returned by the commits API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitStats {
    #[serde(default)]
    pub additions: i64,
    #[serde(default)]
    pub deletions: i64,
    #[serde(default)]
    pub total: i64,
}

/// One file entry of a commit or pull request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileChange {
    pub filename: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub additions: i64,
    #[serde(default)]
    pub deletions: i64,
    /// Unified diff for the file; absent for binary or very large files.
    #[serde(default)]
    pub patch: Option<String>,
}

/// A commit with stats and per-file patches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Commit {
    pub sha: String,
    #[serde(default)]
    pub stats: CommitStats,
    #[serde(default)]
    pub files: Vec<FileChange>,
}

/// A user reference inside API responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    pub login: String,
}

/// A branch reference (`head`/`base`) inside a pull request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub name: String,
}

/// A pull request as returned by the pulls API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub user: Account,
    #[serde(default)]
    pub head: BranchRef,
    #[serde(default)]
    pub base: BranchRef,
    #[serde(default)]
    pub html_url: String,
}

/// A submitted pull request review.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub user: Account,
    #[serde(default)]
    pub state: String,
}

/// A repository as returned by the repos API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub default_branch: String,
    #[serde(default)]
    pub clone_url: String,
    #[serde(default)]
    pub ssh_url: String,
}

/// Pull request details: the PR itself plus its files and reviews.
#[derive(Debug, Clone, Default)]
pub struct PrDetails {
    pub pull_request: PullRequest,
    pub files: Vec<FileChange>,
    pub reviews: Vec<Review>,
}

/// Authenticated client for one organization's repositories.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    org: String,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let http = reqwest::Client::builder()
            .user_agent(constants::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(GithubError::Client)?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            org: config.org.clone(),
        })
    }

    /// The organization this client is scoped to.
    pub fn org(&self) -> &str {
        &self.org
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, GithubError> {
        let url = self.url(path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| GithubError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GithubError::Status { status, url, body });
        }

        response
            .json()
            .await
            .map_err(|e| GithubError::Transport { url, source: e })
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<(), GithubError> {
        let url = self.url(path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(payload)
            .send()
            .await
            .map_err(|e| GithubError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GithubError::Status { status, url, body });
        }

        Ok(())
    }

    /// Install a webhook on `repo` that delivers to `callback_url`.
    pub async fn create_repo_webhook(
        &self,
        repo: &str,
        callback_url: &str,
    ) -> Result<(), GithubError> {
        let payload = hook_payload(callback_url);
        self.post_json(&format!("/repos/{}/{repo}/hooks", self.org), &payload)
            .await
    }

    /// Fetch a commit with stats and per-file patches.
    pub async fn get_commit(&self, repo: &str, sha: &str) -> Result<Commit, GithubError> {
        self.get_json(&format!("/repos/{}/{repo}/commits/{sha}", self.org))
            .await
    }

    /// Fetch a pull request.
    pub async fn get_pull_request(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest, GithubError> {
        self.get_json(&format!("/repos/{}/{repo}/pulls/{number}", self.org))
            .await
    }

    /// List the files changed by a pull request.
    pub async fn list_pr_files(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Vec<FileChange>, GithubError> {
        self.get_json(&format!("/repos/{}/{repo}/pulls/{number}/files", self.org))
            .await
    }

    /// List the submitted reviews of a pull request.
    pub async fn list_pr_reviews(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Review>, GithubError> {
        self.get_json(&format!(
            "/repos/{}/{repo}/pulls/{number}/reviews",
            self.org
        ))
        .await
    }

    /// Fetch a pull request together with its files and reviews.
    pub async fn pr_details(&self, repo: &str, number: u64) -> Result<PrDetails, GithubError> {
        let pull_request = self.get_pull_request(repo, number).await?;
        let files = self.list_pr_files(repo, number).await?;
        let reviews = self.list_pr_reviews(repo, number).await?;

        Ok(PrDetails {
            pull_request,
            files,
            reviews,
        })
    }

    /// Fetch repository details.
    pub async fn get_repository(&self, repo: &str) -> Result<Repository, GithubError> {
        self.get_json(&format!("/repos/{}/{repo}", self.org)).await
    }
}

/// Build the webhook creation payload: JSON deliveries, SSL verification on,
/// subscribed to the PR-lifecycle event set.
fn hook_payload(callback_url: &str) -> Value {
    serde_json::json!({
        "name": "web",
        "active": true,
        "events": constants::HOOK_EVENTS,
        "config": {
            "url": callback_url,
            "content_type": "json",
            "insecure_ssl": "0",
        },
    })
}

/// Assemble human-readable diff text from a commit's per-file patches.
pub fn format_commit_diff(commit: &Commit) -> String {
    let short_sha = commit.sha.get(..8).unwrap_or(&commit.sha);
    let mut out = String::new();

    out.push_str(&format!("=== COMMIT DIFF: {short_sha} ===\n"));
    out.push_str(&format!("Total files changed: {}\n", commit.files.len()));
    out.push_str(&format!(
        "Additions: +{}, Deletions: -{}\n\n",
        commit.stats.additions, commit.stats.deletions
    ));

    for (i, file) in commit.files.iter().enumerate() {
        out.push_str(&format!("FILE {}: {}\n", i + 1, file.filename));
        out.push_str(&format!("Status: {}\n", file.status));
        out.push_str(&format!(
            "Changes: +{}/-{} lines\n",
            file.additions, file.deletions
        ));
        if let Some(ref patch) = file.patch {
            out.push_str("DIFF:\n");
            out.push_str(patch);
            out.push('\n');
        }
        out.push_str(&format!("{}\n", "-".repeat(60)));
    }

    out
}
