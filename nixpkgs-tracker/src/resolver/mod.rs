//! Resolves a pull request to its per-channel merge status.
//!
//! The flow is: normalize the identifier, fetch the pull request, pick
//! the candidate channel branches from its target ref, then compare every
//! branch against the merge commit concurrently. A failed lookup aborts
//! the resolution; a failed comparison only marks that branch.

mod error;

pub use error::ResolveError;

use crate::branches::BranchTable;
use crate::github::{FetchFailure, UpstreamApi};
use crate::identifier::{normalize_identifier, PullRequestNumber};
use crate::pull_requests::{BranchComparison, BranchStatus, PullRequestRecord};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// A fetched pull request and its status on each candidate branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Pull request snapshot.
    pub record: PullRequestRecord,

    /// One entry per candidate branch, in table order. Empty for open
    /// pull requests and for closed ones without a merge commit.
    pub comparisons: Vec<BranchComparison>,
}

/// Resolves pull requests against the upstream API.
#[derive(Clone)]
pub struct Resolver {
    api: Arc<dyn UpstreamApi>,
    branches: BranchTable,
}

impl Resolver {
    /// Creates a resolver using `api` for requests and `branches` for
    /// candidate selection.
    pub fn new(api: Arc<dyn UpstreamApi>, branches: BranchTable) -> Self {
        Self { api, branches }
    }

    /// Returns the branch table in use.
    #[must_use]
    pub fn branches(&self) -> &BranchTable {
        &self.branches
    }

    /// Resolves raw user input (a number or a pull request URL).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidIdentifier`] for unusable input and
    /// [`ResolveError::Fetch`] if the pull request lookup fails. No
    /// comparisons are attempted in either case.
    pub async fn resolve(&self, raw_input: &str) -> Result<Resolution, ResolveError> {
        let number = normalize_identifier(raw_input)?;
        self.resolve_number(number).await
    }

    /// Resolves an already normalized pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Fetch`] if the pull request lookup fails.
    pub async fn resolve_number(
        &self,
        number: PullRequestNumber,
    ) -> Result<Resolution, ResolveError> {
        let span = info_span!("resolve", pr = %number);

        async {
            let record = self
                .fetch_pull_request(number)
                .await
                .map_err(|failure| ResolveError::Fetch { number, failure })?;
            let comparisons = self.compare_branches(&record).await;

            info!(
                state = %record.state,
                base_ref = %record.base_ref,
                branches = comparisons.len(),
                "Resolved pull request"
            );
            Ok(Resolution {
                record,
                comparisons,
            })
        }
        .instrument(span)
        .await
    }

    /// Fetches the pull request record.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchFailure`] reported by the upstream API.
    pub async fn fetch_pull_request(
        &self,
        number: PullRequestNumber,
    ) -> Result<PullRequestRecord, FetchFailure> {
        self.api.pull_request(number).await.inspect_err(|failure| {
            warn!(error = %failure, "Error while fetching PR #{number}");
        })
    }

    /// Candidate branches for a pull request targeting `target_ref`.
    #[must_use]
    pub fn select_candidate_branches(&self, target_ref: &str) -> &[String] {
        self.branches.select_candidate_branches(target_ref)
    }

    /// Compares one channel branch against `merge_commit_sha`.
    ///
    /// Never fails: upstream errors become [`BranchStatus::FetchError`].
    pub async fn compare_branch(
        &self,
        number: PullRequestNumber,
        branch: &str,
        merge_commit_sha: &str,
    ) -> BranchComparison {
        let status = match self.api.compare(branch, merge_commit_sha).await {
            Ok(relationship) => BranchStatus::from(relationship),
            Err(failure) => {
                warn!(
                    branch,
                    error = %failure,
                    "Error while fetching branch data for PR #{number}"
                );
                BranchStatus::FetchError
            }
        };
        debug!(branch, status = %status, "Compared branch");
        BranchComparison::new(branch, status)
    }

    /// Compares every candidate branch of `record` concurrently.
    ///
    /// Results keep the table order regardless of completion order. Open
    /// pull requests and records without a merge commit yield no
    /// comparisons.
    pub async fn compare_branches(&self, record: &PullRequestRecord) -> Vec<BranchComparison> {
        if record.is_open() {
            debug!("Pull request is open, skipping branch comparisons");
            return Vec::new();
        }
        let Some(sha) = record.merge_commit_sha.as_deref() else {
            debug!("Pull request has no merge commit, skipping branch comparisons");
            return Vec::new();
        };

        let branches = self.select_candidate_branches(&record.base_ref);
        join_all(
            branches
                .iter()
                .map(|branch| self.compare_branch(record.number, branch, sha)),
        )
        .await
    }
}
