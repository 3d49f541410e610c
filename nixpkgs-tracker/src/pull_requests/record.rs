//! Pull request metadata as fetched from the upstream repository.

use crate::identifier::PullRequestNumber;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state reported by GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    /// Still awaiting review or merge.
    Open,
    /// Merged or closed without merging.
    Closed,
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// The most recent lifecycle event of a pull request, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Opened at the given time and still open.
    Opened(DateTime<Utc>),
    /// Merged at the given time.
    Merged(DateTime<Utc>),
    /// Closed without merging at the given time.
    Closed(DateTime<Utc>),
}

impl Lifecycle {
    /// Past-tense verb for the event.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Opened(_) => "opened",
            Self::Merged(_) => "merged",
            Self::Closed(_) => "closed",
        }
    }

    /// When the event happened.
    #[must_use]
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Opened(at) | Self::Merged(at) | Self::Closed(at) => *at,
        }
    }
}

/// Immutable snapshot of a pull request.
///
/// Replaced wholesale on every re-fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRecord {
    /// Pull request number.
    pub number: PullRequestNumber,

    /// Pull request title.
    pub title: String,

    /// Login of the author.
    pub author: String,

    /// Profile URL of the author.
    pub author_url: String,

    /// Web URL of the pull request.
    pub html_url: String,

    /// Branch the pull request targets (e.g. `master`).
    pub base_ref: String,

    /// Lifecycle state.
    pub state: PullRequestState,

    /// Whether the pull request was merged.
    pub merged: bool,

    /// Merge commit, once GitHub has computed one.
    pub merge_commit_sha: Option<String>,

    /// When the pull request was opened.
    pub created_at: DateTime<Utc>,

    /// When the pull request was closed, if it was.
    pub closed_at: Option<DateTime<Utc>>,

    /// When the pull request was merged, if it was.
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequestRecord {
    /// Returns true while the pull request is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == PullRequestState::Open
    }

    /// Short badge text: `Open`, `Merged` or `Closed`.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        match (self.state, self.merged) {
            (PullRequestState::Open, _) => "Open",
            (PullRequestState::Closed, true) => "Merged",
            (PullRequestState::Closed, false) => "Closed",
        }
    }

    /// The event worth showing next to the title.
    ///
    /// Falls back to the creation time when GitHub omits the closing
    /// timestamp.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        match (self.state, self.merged) {
            (PullRequestState::Open, _) => Lifecycle::Opened(self.created_at),
            (PullRequestState::Closed, true) => {
                Lifecycle::Merged(self.merged_at.or(self.closed_at).unwrap_or(self.created_at))
            }
            (PullRequestState::Closed, false) => {
                Lifecycle::Closed(self.closed_at.unwrap_or(self.created_at))
            }
        }
    }
}
