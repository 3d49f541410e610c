//! Resolution error types.

use crate::github::FetchFailure;
use crate::identifier::{IdentifierError, PullRequestNumber};
use thiserror::Error;

/// Errors that abort a whole resolution.
///
/// Per-branch comparison failures never show up here; they are recorded
/// as [`BranchStatus::FetchError`](crate::pull_requests::BranchStatus::FetchError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The input did not contain a pull request number.
    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),

    /// The pull request itself could not be fetched.
    #[error("Error while fetching PR #{number}: {failure}")]
    Fetch {
        number: PullRequestNumber,
        failure: FetchFailure,
    },
}

impl ResolveError {
    /// Returns the upstream failure kind, if this was a fetch failure.
    #[must_use]
    pub fn fetch_failure(&self) -> Option<FetchFailure> {
        match self {
            Self::Fetch { failure, .. } => Some(*failure),
            Self::InvalidIdentifier(_) => None,
        }
    }
}
