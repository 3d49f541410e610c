//! Access to the upstream GitHub REST API.
//!
//! Only two endpoints are used: pull request lookup and the three-way
//! commit comparison. [`UpstreamApi`] is the seam the resolver depends on;
//! [`GitHubClient`] is the octocrab-backed implementation.

mod error;
mod payload;

pub use error::{ClientError, FetchFailure};

use crate::config::UpstreamConfig;
use crate::identifier::PullRequestNumber;
use crate::pull_requests::{ComparisonStatus, PullRequestRecord};
use async_trait::async_trait;
use http::header::ACCEPT;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use payload::{ComparePayload, PullRequestPayload};
use tracing::debug;

/// Media type requesting GitHub's structured JSON representation.
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// Read-only operations against the upstream repository.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// Fetch pull request metadata.
    async fn pull_request(
        &self,
        number: PullRequestNumber,
    ) -> Result<PullRequestRecord, FetchFailure>;

    /// Compare `base...head` and return the reported relationship.
    async fn compare(&self, base: &str, head: &str) -> Result<ComparisonStatus, FetchFailure>;
}

/// GitHub service using octocrab.
///
/// Must be constructed inside a tokio runtime.
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Creates a client for `upstream`, authenticating with `token` when one
    /// is supplied. An empty token counts as none.
    ///
    /// Every request is sent exactly once; failures are reported, not retried.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the base URI is invalid or the client
    /// cannot be built.
    pub fn new(upstream: &UpstreamConfig, token: Option<&str>) -> Result<Self, ClientError> {
        let mut builder = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .base_uri(upstream.api_base_uri.as_str())?
            .add_header(ACCEPT, GITHUB_JSON.to_string());

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = builder.personal_token(token.to_string());
        }

        Ok(Self {
            client: builder.build()?,
            owner: upstream.owner.clone(),
            repo: upstream.repo.clone(),
        })
    }

    fn pull_route(&self, number: PullRequestNumber) -> String {
        format!("/repos/{}/{}/pulls/{}", self.owner, self.repo, number)
    }

    fn compare_route(&self, base: &str, head: &str) -> String {
        format!("/repos/{}/{}/compare/{}...{}", self.owner, self.repo, base, head)
    }
}

#[async_trait]
impl UpstreamApi for GitHubClient {
    async fn pull_request(
        &self,
        number: PullRequestNumber,
    ) -> Result<PullRequestRecord, FetchFailure> {
        let route = self.pull_route(number);
        debug!(%route, "fetching pull request");

        let payload: PullRequestPayload = self
            .client
            .get(&route, None::<&()>)
            .await
            .map_err(|e| {
                debug!(%route, error = %e, "pull request lookup failed");
                FetchFailure::from(&e)
            })?;

        Ok(payload.into())
    }

    async fn compare(&self, base: &str, head: &str) -> Result<ComparisonStatus, FetchFailure> {
        let route = self.compare_route(base, head);
        debug!(%route, "comparing commits");

        let payload: ComparePayload = self
            .client
            .get(&route, None::<&()>)
            .await
            .map_err(|e| {
                debug!(%route, error = %e, "commit comparison failed");
                FetchFailure::from(&e)
            })?;

        debug!(%route, status = ?payload.status, "compared commits");
        Ok(payload.status)
    }
}
