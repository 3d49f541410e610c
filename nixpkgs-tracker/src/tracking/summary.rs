//! Refresh summary types.

use crate::resolver::ResolveError;

/// Outcome of refreshing the tracking list.
#[derive(Debug, Clone, Default)]
pub struct RefreshSummary {
    /// Number of entries that received fresh data.
    pub resolved: usize,

    /// Lookups that failed. The affected entries stay unresolved.
    pub failures: Vec<ResolveError>,
}

impl RefreshSummary {
    /// Returns true if any lookup failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
