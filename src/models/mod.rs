//! Shared types used across all modules.
//!
//! Defines the event vocabulary (kind and scope) plus the payload and
//! summary types built from webhook JSON. Other modules import from here
//! rather than reaching into each other's internals.

pub mod event;
pub mod summary;

use serde::{Deserialize, Serialize};

pub use event::{PrEvent, PushCommit, PushEvent, RepositoryEvent};
pub use summary::{CommitSummary, PrSummary, RepoCreated};

/// The GitHub event name that accompanies a webhook delivery
/// (`X-GitHub-Event` on the wire, `GITHUB_EVENT_NAME` in Actions).
#[derive(Debug, Clone, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    Repository,
    Push,
    PullRequest,
    Ping,
    /// Any event we receive but do not process beyond an acknowledgment.
    #[strum(default)]
    Other(String),
}

/// Which hook an event arrived on. Organization hooks see org-wide activity
/// and get brief handling; repository hooks get the detailed handlers.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Scope {
    Org,
    #[default]
    Repo,
}
