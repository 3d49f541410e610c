//! String-keyed persistence for user state.
//!
//! The tracker only ever stores two keys (the API token and the tracked
//! pull request list), so the abstraction is a plain key-value store.

mod error;
mod file;

pub use error::StoreError;
pub use file::FileStore;

use std::collections::BTreeMap;

/// Key under which the bearer token is stored.
pub const TOKEN_KEY: &str = "token";

/// Key under which the tracked pull request list is stored.
pub const TRACKING_KEY: &str = "tracking_pull_requests";

/// Minimal key-value persistence.
pub trait KeyValueStore {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Returns the stored API token, if any.
///
/// # Errors
///
/// Returns [`StoreError`] if the store cannot be read.
pub fn load_token(store: &impl KeyValueStore) -> Result<Option<String>, StoreError> {
    Ok(store.get(TOKEN_KEY)?.filter(|token| !token.is_empty()))
}

/// Saves the API token verbatim. An empty token clears it.
///
/// # Errors
///
/// Returns [`StoreError`] if the store cannot be written.
pub fn save_token(store: &mut impl KeyValueStore, token: &str) -> Result<(), StoreError> {
    if token.is_empty() {
        store.remove(TOKEN_KEY)
    } else {
        store.set(TOKEN_KEY, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn token_is_stored_verbatim() {
        let mut store = MemoryStore::new();
        save_token(&mut store, "github_pat_ 123").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("github_pat_ 123"));
        assert_eq!(load_token(&store).unwrap().as_deref(), Some("github_pat_ 123"));
    }

    #[test]
    fn empty_token_clears_it() {
        let mut store = MemoryStore::new();
        save_token(&mut store, "secret").unwrap();
        save_token(&mut store, "").unwrap();
        assert_eq!(load_token(&store).unwrap(), None);
    }

    #[test]
    fn empty_stored_token_counts_as_none() {
        let mut store = MemoryStore::new();
        store.set(TOKEN_KEY, "").unwrap();
        assert_eq!(load_token(&store).unwrap(), None);
    }
}
