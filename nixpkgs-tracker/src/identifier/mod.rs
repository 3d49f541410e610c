//! Pull request identifiers.
//!
//! Users may type either a bare number (`449457`) or paste a pull request
//! URL (`https://github.com/NixOS/nixpkgs/pull/449457/files`). Both reduce
//! to the same [`PullRequestNumber`].

mod error;

pub use error::IdentifierError;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Matches the digit run following a `/pull/` path segment.
static PULL_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/pull/(\d+)").expect("pull segment pattern is valid"));

/// A normalized pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a raw pull request number.
    #[must_use]
    pub const fn new(number: u64) -> Self {
        Self(number)
    }

    /// Returns the raw number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PullRequestNumber {
    fn from(number: u64) -> Self {
        Self(number)
    }
}

impl FromStr for PullRequestNumber {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_identifier(s)
    }
}

/// Extracts a pull request number from raw user input.
///
/// If the input contains a `/pull/<digits>` segment, those digits are used;
/// otherwise the (trimmed) input itself must be a digit string.
///
/// # Errors
///
/// Returns [`IdentifierError::Invalid`] if no usable number is present.
pub fn normalize_identifier(raw_input: &str) -> Result<PullRequestNumber, IdentifierError> {
    let trimmed = raw_input.trim();
    let candidate = PULL_SEGMENT
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .map_or(trimmed, |digits| digits.as_str());

    if candidate.is_empty() || !candidate.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdentifierError::Invalid {
            input: raw_input.to_string(),
        });
    }

    candidate
        .parse::<u64>()
        .map(PullRequestNumber)
        .map_err(|_| IdentifierError::Invalid {
            input: raw_input.to_string(),
        })
}
