#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod branches;
pub mod config;
pub mod github;
pub mod identifier;
pub mod pull_requests;
pub mod resolver;
pub mod store;
pub mod tracking;

pub use branches::BranchTable;
pub use config::{load_config, ConfigError, TrackerConfig, UpstreamConfig};
pub use github::{ClientError, FetchFailure, GitHubClient, UpstreamApi, GITHUB_JSON};
pub use identifier::{normalize_identifier, IdentifierError, PullRequestNumber};
pub use pull_requests::{
    BranchComparison, BranchStatus, ComparisonStatus, Lifecycle, PullRequestRecord,
    PullRequestState,
};
pub use resolver::{Resolution, ResolveError, Resolver};
pub use store::{load_token, save_token, FileStore, KeyValueStore, MemoryStore, StoreError};
pub use tracking::{RefreshSummary, TrackedPullRequest, TrackingList};
