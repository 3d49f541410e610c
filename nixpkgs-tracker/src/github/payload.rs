//! Response bodies for the two endpoints, reduced to the fields we read.

use crate::identifier::PullRequestNumber;
use crate::pull_requests::{ComparisonStatus, PullRequestRecord, PullRequestState};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Login GitHub shows for deleted accounts.
const GHOST_LOGIN: &str = "ghost";

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestPayload {
    number: u64,
    title: String,
    user: Option<UserPayload>,
    html_url: String,
    base: BasePayload,
    state: PullRequestState,
    #[serde(default)]
    merged: bool,
    merge_commit_sha: Option<String>,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct BasePayload {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComparePayload {
    pub(crate) status: ComparisonStatus,
}

impl From<PullRequestPayload> for PullRequestRecord {
    fn from(pr: PullRequestPayload) -> Self {
        let (author, author_url) = match pr.user {
            Some(user) => (user.login, user.html_url),
            None => (
                GHOST_LOGIN.to_string(),
                format!("https://github.com/{GHOST_LOGIN}"),
            ),
        };

        Self {
            number: PullRequestNumber::new(pr.number),
            title: pr.title,
            author,
            author_url,
            html_url: pr.html_url,
            base_ref: pr.base.ref_name,
            state: pr.state,
            merged: pr.merged,
            merge_commit_sha: pr.merge_commit_sha.filter(|sha| !sha.is_empty()),
            created_at: pr.created_at,
            closed_at: pr.closed_at,
            merged_at: pr.merged_at,
        }
    }
}
