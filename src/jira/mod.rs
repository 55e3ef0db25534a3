//! Jira Cloud REST v2 client for the pull request issue lifecycle.
//!
//! One issue per pull request, tagged with a `pr-<number>` label so it can
//! be found again when the PR merges. Workflow movement goes through the
//! transitions API: list the available transitions, pick the one whose
//! target status matches, and perform it.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::JiraConfig;
use crate::constants;
use crate::models::PrSummary;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from Jira API calls.
#[derive(Error, Debug)]
pub enum JiraError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Jira API returned HTTP {status} for {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("no issue found for PR #{0}")]
    IssueNotFound(u64),

    #[error("no transition found to status: {0}")]
    NoTransition(String),
}

/// A created or found issue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
}

/// A workflow transition offered for an issue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub to: TransitionTarget,
}

/// The status a transition leads to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransitionTarget {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
struct TransitionsResponse {
    #[serde(default)]
    transitions: Vec<Transition>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<Issue>,
}

/// Authenticated Jira client (email + API token, HTTP basic auth).
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    api_token: String,
    project_key: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self, JiraError> {
        let http = reqwest::Client::builder()
            .user_agent(constants::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(JiraError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            api_token: config.api_token.clone(),
            project_key: config.project_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: String,
    ) -> Result<T, JiraError> {
        let response = request
            .basic_auth(&self.email, Some(&self.api_token))
            .send()
            .await
            .map_err(|e| JiraError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(JiraError::Status { status, url, body });
        }

        response
            .json()
            .await
            .map_err(|e| JiraError::Transport { url, source: e })
    }

    async fn post_expect_empty(&self, path: &str, payload: &Value) -> Result<(), JiraError> {
        let url = self.url(path);
        let response = self
            .http
            .post(&url)
            .json(payload)
            .basic_auth(&self.email, Some(&self.api_token))
            .send()
            .await
            .map_err(|e| JiraError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(JiraError::Status { status, url, body });
        }

        Ok(())
    }

    /// Create the issue tracking a freshly opened pull request, then move it
    /// into the open-PR status. A failed transition is reported but does not
    /// fail issue creation, matching the lenient workflow handling elsewhere.
    pub async fn create_pr_issue(&self, pr: &PrSummary) -> Result<Issue, JiraError> {
        let created_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let payload = issue_payload(&self.project_key, pr, &created_at);

        let url = self.url("/rest/api/2/issue");
        let request = self.http.post(&url).json(&payload);
        let issue: Issue = self.send_json(request, url).await?;

        if let Err(e) = self.move_to_status(&issue.key, constants::STATUS_OPEN_PR).await {
            tracing::warn!(issue = %issue.key, "could not move new issue to {}: {e}", constants::STATUS_OPEN_PR);
        }

        Ok(issue)
    }

    /// Find the issue tracking a pull request by its `pr-<number>` label.
    pub async fn find_pr_issue(&self, pr_number: u64) -> Result<Issue, JiraError> {
        let jql = format!(
            "project = \"{}\" AND labels = \"{}\"",
            self.project_key,
            constants::pr_label(pr_number),
        );

        let url = self.url("/rest/api/2/search");
        let request = self
            .http
            .get(&url)
            .query(&[("jql", jql.as_str()), ("maxResults", "1")]);
        let result: SearchResponse = self.send_json(request, url).await?;

        result
            .issues
            .into_iter()
            .next()
            .ok_or(JiraError::IssueNotFound(pr_number))
    }

    /// Move an issue to the named workflow status, if a transition exists.
    pub async fn move_to_status(&self, issue_key: &str, target: &str) -> Result<(), JiraError> {
        let url = self.url(&format!("/rest/api/2/issue/{issue_key}/transitions"));
        let request = self.http.get(&url);
        let available: TransitionsResponse = self.send_json(request, url).await?;

        let transition = available
            .transitions
            .into_iter()
            .find(|t| t.to.name == target)
            .ok_or_else(|| JiraError::NoTransition(target.to_string()))?;

        self.post_expect_empty(
            &format!("/rest/api/2/issue/{issue_key}/transitions"),
            &serde_json::json!({ "transition": { "id": transition.id } }),
        )
        .await
    }

    /// Move the issue tracking a merged pull request to the merged status.
    pub async fn move_pr_to_merged(&self, pr_number: u64) -> Result<(), JiraError> {
        let issue = self.find_pr_issue(pr_number).await?;
        self.move_to_status(&issue.key, constants::STATUS_MERGED_PR)
            .await
    }
}

/// Build the issue-creation payload for a pull request.
///
/// The description uses Jira wiki markup; the labels tie the issue back to
/// the PR so [`JiraClient::find_pr_issue`] can locate it later.
pub fn issue_payload(project_key: &str, pr: &PrSummary, created_at: &str) -> Value {
    let files = if pr.files_changed.is_empty() {
        "(none listed)".to_string()
    } else {
        pr.files_changed
            .iter()
            .map(|f| format!("* {f}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let description = format!(
        "*GitHub PR Details:*\n\
         * Repository: {}\n\
         * PR Number: #{}\n\
         * Author: {}\n\
         * Source Branch: {} into {}\n\
         * PR Link: [View on GitHub|{}]\n\
         \n\
         *Files Changed:*\n\
         {}\n\
         \n\
         _Created: {}_",
        pr.repository,
        pr.number,
        pr.author,
        pr.source_branch,
        pr.target_branch,
        pr.link,
        files,
        created_at,
    );

    serde_json::json!({
        "fields": {
            "project": { "key": project_key },
            "issuetype": { "name": "Task" },
            "summary": format!("PR #{}: {}", pr.number, pr.title),
            "description": description,
            "labels": [
                constants::LABEL_GITHUB_PR,
                constants::pr_label(pr.number),
            ],
        }
    })
}
