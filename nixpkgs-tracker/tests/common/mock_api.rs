//! Mock upstream API for testing
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use nixpkgs_tracker::{
    ComparisonStatus, FetchFailure, PullRequestNumber, PullRequestRecord, PullRequestState,
    UpstreamApi,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Call record for `compare`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareCall {
    pub base: String,
    pub head: String,
}

/// Hand-written mock of [`UpstreamApi`].
///
/// Features:
/// - Configurable responses per pull request and per branch
/// - Per-branch delays to control completion order
/// - Call tracking and peak concurrency measurement
#[derive(Default)]
pub struct MockUpstreamApi {
    pull_responses: Mutex<HashMap<u64, Result<PullRequestRecord, FetchFailure>>>,
    compare_responses: Mutex<HashMap<String, Result<ComparisonStatus, FetchFailure>>>,
    compare_delays: Mutex<HashMap<String, Duration>>,
    // Call tracking
    pull_calls: Mutex<Vec<u64>>,
    compare_calls: Mutex<Vec<CompareCall>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockUpstreamApi {
    pub fn new() -> Self {
        Self::default()
    }

    // === Response setup ===

    pub fn set_pull(&self, record: PullRequestRecord) {
        self.pull_responses
            .lock()
            .unwrap()
            .insert(record.number.get(), Ok(record));
    }

    pub fn fail_pull(&self, number: u64, failure: FetchFailure) {
        self.pull_responses
            .lock()
            .unwrap()
            .insert(number, Err(failure));
    }

    pub fn set_compare(&self, branch: &str, status: ComparisonStatus) {
        self.compare_responses
            .lock()
            .unwrap()
            .insert(branch.to_string(), Ok(status));
    }

    pub fn fail_compare(&self, branch: &str, failure: FetchFailure) {
        self.compare_responses
            .lock()
            .unwrap()
            .insert(branch.to_string(), Err(failure));
    }

    pub fn delay_compare(&self, branch: &str, delay: Duration) {
        self.compare_delays
            .lock()
            .unwrap()
            .insert(branch.to_string(), delay);
    }

    // === Call inspection ===

    pub fn pull_calls(&self) -> Vec<u64> {
        self.pull_calls.lock().unwrap().clone()
    }

    pub fn compare_calls(&self) -> Vec<CompareCall> {
        self.compare_calls.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamApi for MockUpstreamApi {
    async fn pull_request(
        &self,
        number: PullRequestNumber,
    ) -> Result<PullRequestRecord, FetchFailure> {
        self.pull_calls.lock().unwrap().push(number.get());
        self.pull_responses
            .lock()
            .unwrap()
            .get(&number.get())
            .cloned()
            .unwrap_or(Err(FetchFailure::NotFound))
    }

    async fn compare(&self, base: &str, head: &str) -> Result<ComparisonStatus, FetchFailure> {
        self.compare_calls.lock().unwrap().push(CompareCall {
            base: base.to_string(),
            head: head.to_string(),
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.compare_delays.lock().unwrap().get(base).copied();
        // Yield at least once so sibling comparisons can start.
        tokio::time::sleep(delay.unwrap_or(Duration::from_millis(5))).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.compare_responses
            .lock()
            .unwrap()
            .get(base)
            .cloned()
            .unwrap_or(Err(FetchFailure::Unknown))
    }
}

/// A merged pull request against `base_ref` with merge commit `sha`.
pub fn merged_pr(number: u64, base_ref: &str, sha: &str) -> PullRequestRecord {
    PullRequestRecord {
        number: PullRequestNumber::new(number),
        title: format!("package: update for #{number}"),
        author: "octocat".to_string(),
        author_url: "https://github.com/octocat".to_string(),
        html_url: format!("https://github.com/NixOS/nixpkgs/pull/{number}"),
        base_ref: base_ref.to_string(),
        state: PullRequestState::Closed,
        merged: true,
        merge_commit_sha: Some(sha.to_string()),
        created_at: Utc.with_ymd_and_hms(2025, 10, 1, 8, 0, 0).unwrap(),
        closed_at: Some(Utc.with_ymd_and_hms(2025, 10, 6, 9, 30, 0).unwrap()),
        merged_at: Some(Utc.with_ymd_and_hms(2025, 10, 6, 9, 30, 0).unwrap()),
    }
}

/// An open pull request against `base_ref`.
pub fn open_pr(number: u64, base_ref: &str) -> PullRequestRecord {
    PullRequestRecord {
        state: PullRequestState::Open,
        merged: false,
        closed_at: None,
        merged_at: None,
        // GitHub reports a test-merge commit even for open pull requests.
        merge_commit_sha: Some("test-merge".to_string()),
        ..merged_pr(number, base_ref, "unused")
    }
}
