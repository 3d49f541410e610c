//! Candidate branch selection.
//!
//! A pull request targeting `master` or `staging-next` flows into the
//! unstable channels; anything else is assumed to be a backport to the
//! current stable release. The release names go stale every six months,
//! so the table lives in [`BranchTable`] and can be overridden from
//! `config.toml`.

use serde::Deserialize;

/// Lookup table mapping a pull request's target ref to the channel
/// branches it should eventually reach.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BranchTable {
    /// Target refs whose pull requests land in the unstable channels.
    pub unstable_targets: Vec<String>,

    /// Channel branches checked for unstable targets, in display order.
    pub unstable: Vec<String>,

    /// Channel branches checked for every other target, in display order.
    pub release: Vec<String>,
}

impl Default for BranchTable {
    fn default() -> Self {
        Self {
            unstable_targets: default_unstable_targets(),
            unstable: default_unstable_branches(),
            release: default_release_branches(),
        }
    }
}

impl BranchTable {
    /// Returns the channel branches to compare for a pull request
    /// targeting `target_ref`.
    #[must_use]
    pub fn select_candidate_branches(&self, target_ref: &str) -> &[String] {
        if self.unstable_targets.iter().any(|t| t == target_ref) {
            &self.unstable
        } else {
            &self.release
        }
    }
}

/// Default refs that feed the unstable channels.
pub fn default_unstable_targets() -> Vec<String> {
    to_owned(&["master", "staging-next"])
}

/// Default unstable channel branches.
pub fn default_unstable_branches() -> Vec<String> {
    to_owned(&["nixpkgs-unstable", "nixos-unstable", "nixos-unstable-small"])
}

/// Default stable channel branches.
pub fn default_release_branches() -> Vec<String> {
    to_owned(&["nixos-25.05", "nixos-25.05-small", "nixpkgs-25.05-darwin"])
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}
