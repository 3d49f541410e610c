//! Per-branch merge status types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relationship GitHub reports between a channel branch and a commit.
///
/// The comparison is `compare/<branch>...<sha>`, so `behind` means the
/// commit is already contained in the branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    /// Branch tip and commit are the same.
    Identical,
    /// Commit has changes the branch lacks.
    Ahead,
    /// Commit is an ancestor of the branch tip.
    Behind,
    /// Both sides have unique commits.
    Diverged,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Whether a pull request has reached a given branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchStatus {
    /// The merge commit is contained in the branch.
    Merged,
    /// The branch does not contain the merge commit yet.
    NotMerged,
    /// The comparison could not be fetched.
    FetchError,
}

impl BranchStatus {
    /// Returns the status as shown to users.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merged => "merged",
            Self::NotMerged => "not-merged",
            Self::FetchError => "fetch-error",
        }
    }
}

impl From<ComparisonStatus> for BranchStatus {
    fn from(status: ComparisonStatus) -> Self {
        match status {
            ComparisonStatus::Identical | ComparisonStatus::Behind => Self::Merged,
            ComparisonStatus::Ahead | ComparisonStatus::Diverged | ComparisonStatus::Unknown => {
                Self::NotMerged
            }
        }
    }
}

impl fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one channel branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchComparison {
    /// Channel branch name.
    pub branch: String,

    /// Whether the pull request has reached it.
    pub status: BranchStatus,
}

impl BranchComparison {
    /// Creates a comparison result for `branch`.
    pub fn new(branch: impl Into<String>, status: BranchStatus) -> Self {
        Self {
            branch: branch.into(),
            status,
        }
    }
}
