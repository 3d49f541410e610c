//! Upstream API error types.

use thiserror::Error;

/// Why a request to the upstream API did not produce a usable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The pull request or comparison target does not exist.
    #[error("Not found")]
    NotFound,

    /// The API quota is exhausted. Far more likely without a token.
    #[error("Rate limit reached")]
    RateLimited,

    /// Any other non-success outcome, including transport and decode errors.
    #[error("Unknown Error")]
    Unknown,
}

impl FetchFailure {
    /// Maps a non-success HTTP status code to a failure kind.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            403 => Self::RateLimited,
            _ => Self::Unknown,
        }
    }
}

impl From<&octocrab::Error> for FetchFailure {
    fn from(error: &octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self::from_status(source.status_code.as_u16()),
            _ => Self::Unknown,
        }
    }
}

/// Errors that can occur while setting up the GitHub client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The octocrab client could not be built (e.g. invalid base URI).
    #[error("Failed to build GitHub client: {0}")]
    Octocrab(#[from] octocrab::Error),
}
