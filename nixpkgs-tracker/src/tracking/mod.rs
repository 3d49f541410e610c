//! Pull requests the user keeps an eye on across sessions.
//!
//! Only the numbers are persisted, under [`TRACKING_KEY`] as
//! `[{"pullRequestNumber": 449457}, ...]`. Fetched data is transient and
//! re-resolved every session.

mod summary;

pub use summary::RefreshSummary;

use crate::identifier::PullRequestNumber;
use crate::pull_requests::{BranchComparison, PullRequestRecord};
use crate::resolver::{Resolution, ResolveError, Resolver};
use crate::store::{KeyValueStore, StoreError, TRACKING_KEY};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};

/// Persisted form of a tracked pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedPullRequest {
    pull_request_number: PullRequestNumber,
}

/// A tracked pull request and, once resolved this session, its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedPullRequest {
    /// Pull request number.
    pub number: PullRequestNumber,

    /// Latest resolution, if any.
    pub resolution: Option<Resolution>,
}

impl TrackedPullRequest {
    /// Creates an unresolved entry.
    #[must_use]
    pub fn new(number: PullRequestNumber) -> Self {
        Self {
            number,
            resolution: None,
        }
    }

    /// Fetched record, if resolved.
    #[must_use]
    pub fn record(&self) -> Option<&PullRequestRecord> {
        self.resolution.as_ref().map(|r| &r.record)
    }

    /// Branch comparisons, if resolved.
    #[must_use]
    pub fn comparisons(&self) -> Option<&[BranchComparison]> {
        self.resolution.as_ref().map(|r| r.comparisons.as_slice())
    }
}

/// Ordered, duplicate-free list of tracked pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingList {
    entries: Vec<TrackedPullRequest>,
}

impl TrackingList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the tracked numbers from `store`.
    ///
    /// A missing key is an empty list; duplicates are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or the stored
    /// value is not a valid list.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, StoreError> {
        let Some(raw) = store.get(TRACKING_KEY)? else {
            return Ok(Self::new());
        };

        let persisted: Vec<PersistedPullRequest> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                context: TRACKING_KEY.to_string(),
                source,
            })?;

        let mut list = Self::new();
        for entry in persisted {
            list.track(entry.pull_request_number);
        }
        debug!(count = list.len(), "Loaded tracked pull requests");
        Ok(list)
    }

    /// Persists the tracked numbers to `store`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list cannot be serialized or written.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        let persisted: Vec<PersistedPullRequest> = self
            .entries
            .iter()
            .map(|entry| PersistedPullRequest {
                pull_request_number: entry.number,
            })
            .collect();
        let raw = serde_json::to_string(&persisted).map_err(|source| StoreError::Json {
            context: TRACKING_KEY.to_string(),
            source,
        })?;
        store.set(TRACKING_KEY, &raw)
    }

    /// Starts tracking `number`. Returns false if it was already tracked.
    pub fn track(&mut self, number: PullRequestNumber) -> bool {
        if self.is_tracked(number) {
            return false;
        }
        self.entries.push(TrackedPullRequest::new(number));
        true
    }

    /// Resolves `number` and tracks it only once it was fetched.
    ///
    /// Returns whether the number was newly tracked; either way the entry
    /// carries the fresh resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the pull request lookup fails. The list
    /// is left unchanged.
    pub async fn track_resolved(
        &mut self,
        resolver: &Resolver,
        number: PullRequestNumber,
    ) -> Result<bool, ResolveError> {
        let resolution = resolver.resolve_number(number).await?;
        let added = self.track(number);
        self.apply(number, resolution);
        Ok(added)
    }

    /// Stops tracking `number`. Returns false if it was not tracked.
    pub fn untrack(&mut self, number: PullRequestNumber) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.number != number);
        self.entries.len() != before
    }

    /// Whether `number` is tracked.
    #[must_use]
    pub fn is_tracked(&self, number: PullRequestNumber) -> bool {
        self.entries.iter().any(|entry| entry.number == number)
    }

    /// Entry for `number`, if tracked.
    #[must_use]
    pub fn get(&self, number: PullRequestNumber) -> Option<&TrackedPullRequest> {
        self.entries.iter().find(|entry| entry.number == number)
    }

    /// Tracked numbers in insertion order.
    #[must_use]
    pub fn numbers(&self) -> Vec<PullRequestNumber> {
        self.entries.iter().map(|entry| entry.number).collect()
    }

    /// Tracked entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[TrackedPullRequest] {
        &self.entries
    }

    /// Number of tracked pull requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Numbers that have not been resolved yet.
    #[must_use]
    pub fn pending(&self) -> Vec<PullRequestNumber> {
        self.entries
            .iter()
            .filter(|entry| entry.resolution.is_none())
            .map(|entry| entry.number)
            .collect()
    }

    /// Attaches `resolution` to the entry requested as `number`.
    ///
    /// Matching is by the requested number, never by arrival order. Returns
    /// false, leaving the list untouched, if `number` is no longer tracked.
    pub fn apply(&mut self, number: PullRequestNumber, resolution: Resolution) -> bool {
        match self.entries.iter_mut().find(|entry| entry.number == number) {
            Some(entry) => {
                entry.resolution = Some(resolution);
                true
            }
            None => {
                debug!(pr = %number, "Discarding result for untracked pull request");
                false
            }
        }
    }

    /// Resolves every pending entry, at most `concurrency` at a time.
    ///
    /// Failures leave the entry unresolved and are collected in the summary.
    pub async fn refresh(&mut self, resolver: &Resolver, concurrency: usize) -> RefreshSummary {
        let pending = self.pending();
        let span = info_span!("refresh", pending = pending.len());

        let outcomes = async {
            info!("Refreshing tracked pull requests");
            stream::iter(pending)
                .map(|number| async move { (number, resolver.resolve_number(number).await) })
                .buffer_unordered(concurrency.max(1))
                .collect::<Vec<_>>()
                .await
        }
        .instrument(span)
        .await;

        let mut summary = RefreshSummary::default();
        for (number, outcome) in outcomes {
            match outcome {
                Ok(resolution) => {
                    if self.apply(number, resolution) {
                        summary.resolved += 1;
                    }
                }
                Err(error) => summary.failures.push(error),
            }
        }
        summary
    }
}
