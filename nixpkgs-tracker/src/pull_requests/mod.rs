//! Pull request snapshots and per-branch merge status.

mod record;
mod status;

pub use record::{Lifecycle, PullRequestRecord, PullRequestState};
pub use status::{BranchComparison, BranchStatus, ComparisonStatus};
